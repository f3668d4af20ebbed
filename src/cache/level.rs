//! One capacity-bounded tier: a recency list plus a key dictionary.

use std::hash::Hash;

use crate::cache::KeyValue;
use crate::ds::{Dictionary, LinkArena, List, SlotId};

/// Link field threading a tier's recency list.
pub(crate) const LIST_LINK: usize = 0;
/// Link field threading a tier's dictionary buckets.
pub(crate) const DICT_LINK: usize = 1;

pub(crate) type EntryArena<K, V> = LinkArena<KeyValue<K, V>, 2>;

/// Default entry limit of a freshly created tier.
pub const DEFAULT_MAX_COUNT: usize = 16 * 1024;
/// Default memory limit (bytes) of a freshly created tier.
pub const DEFAULT_MAX_MEM_USAGE: usize = 32 * 1024 * 1024;

/// Point-in-time accounting for a single tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelStats {
    pub count: usize,
    pub mem_usage: usize,
    pub max_count: usize,
    pub max_mem_usage: usize,
}

impl LevelStats {
    pub fn is_over_capacity(&self) -> bool {
        self.count > self.max_count || self.mem_usage > self.max_mem_usage
    }
}

#[derive(Debug)]
pub(crate) struct CacheLevel<K, V> {
    pub(crate) list: List,
    pub(crate) dict: Dictionary<KeyValue<K, V>>,
    pub(crate) count: usize,
    pub(crate) mem_usage: usize,
    pub(crate) max_count: usize,
    pub(crate) max_mem_usage: usize,
}

impl<K: Hash + Eq, V> CacheLevel<K, V> {
    pub(crate) fn new(arena: &mut EntryArena<K, V>) -> Self {
        Self {
            list: List::new(arena, LIST_LINK),
            dict: Dictionary::new(arena, DICT_LINK),
            count: 0,
            mem_usage: 0,
            max_count: DEFAULT_MAX_COUNT,
            max_mem_usage: DEFAULT_MAX_MEM_USAGE,
        }
    }

    #[inline]
    pub(crate) fn is_over_capacity(&self) -> bool {
        self.count > self.max_count || self.mem_usage > self.max_mem_usage
    }

    /// Links `id` at the MRU end and charges its recorded size.
    pub(crate) fn attach(&mut self, arena: &mut EntryArena<K, V>, id: SlotId) {
        let size = arena.get(id).map_or(0, KeyValue::last_mem_size);
        self.list.insert_head(arena, id);
        let inserted = self.dict.put(arena, id);
        debug_assert!(inserted, "key already present in tier");
        self.count += 1;
        self.mem_usage = self.mem_usage.saturating_add(size);
    }

    /// Unlinks `id` from both containers and refunds its recorded size.
    pub(crate) fn detach(&mut self, arena: &mut EntryArena<K, V>, id: SlotId) {
        let size = arena.get(id).map_or(0, KeyValue::last_mem_size);
        self.list.unlink(arena, id);
        self.dict.unlink(arena, id);
        self.count -= 1;
        self.mem_usage = self.mem_usage.saturating_sub(size);
    }

    /// Moves `id` to the MRU end; accounting is unchanged.
    pub(crate) fn touch(&self, arena: &mut EntryArena<K, V>, id: SlotId) {
        self.list.insert_head(arena, id);
    }

    pub(crate) fn stats(&self) -> LevelStats {
        LevelStats {
            count: self.count,
            mem_usage: self.mem_usage,
            max_count: self.max_count,
            max_mem_usage: self.max_mem_usage,
        }
    }
}
