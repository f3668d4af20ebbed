//! # Tiered Cache
//!
//! A fixed number `L` of tiers, each an LRU list plus a key dictionary, all
//! threaded through one [`LinkArena`](crate::ds::LinkArena). An entry lives in
//! exactly one tier at a time. Tier 0 is the hottest; when a tier exceeds its
//! entry or memory limit its least recently used entries cascade into the
//! next tier. The last tier is never evicted from.
//!
//! ## Architecture
//!
//! ```text
//!   TieredCache<K, V, P, L>
//!   ┌───────────────────────────────────────────────────────────────────┐
//!   │ arena: LinkArena<KeyValue<K, V>, 2>                               │
//!   │   field 0 = recency list link, field 1 = dictionary bucket link   │
//!   │                                                                   │
//!   │ levels[0]  MRU [a] ◄──► [b] ◄──► [c] LRU   dict{a, b, c}          │
//!   │                                   │ over capacity: cascade tail   │
//!   │                                   ▼                               │
//!   │ levels[1]  MRU [c] ◄──► [d] LRU             dict{c, d}            │
//!   │    ...                                                            │
//!   │ levels[L-1]  (never evicted from)                                 │
//!   │                                                                   │
//!   │ policy: P: TierPolicy<K, V>                                       │
//!   └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lookup
//!
//! | Situation                  | Effect                                         |
//! |----------------------------|------------------------------------------------|
//! | miss, factory gives value  | insert at head of requested tier (default 0)   |
//! | miss, factory declines     | nothing changes, lookup reports a miss         |
//! | hit, same tier             | move to head of that tier                      |
//! | hit, different tier        | relocate, notify policy, re-estimate size      |
//!
//! Any insertion or relocation is followed by a capacity check that may
//! cascade entries from the affected tier downwards.
//!
//! ## Example
//!
//! ```
//! use tierkit::cache::{DefaultPolicy, TieredCache};
//!
//! let mut cache: TieredCache<&str, u32, DefaultPolicy, 3> = TieredCache::new(DefaultPolicy);
//! cache.configure_level(0, 2, usize::MAX);
//!
//! *cache.get_ptr(&"a", None).unwrap() = 1;
//! cache.get_ptr(&"b", None);
//! cache.get_ptr(&"c", None);
//!
//! // "a" was least recently used and fell into tier 1
//! assert_eq!(cache.level_of(&"a"), Some(1));
//! assert_eq!(cache.find(&"a"), 1);
//!
//! // explicit level requests move entries in either direction
//! cache.get_ptr(&"a", Some(0));
//! assert_eq!(cache.level_of(&"a"), Some(0));
//! ```

#[cfg(feature = "concurrency")]
mod concurrent;
mod level;
mod policy;

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::ds::SlotId;
use crate::error::InvariantError;
use crate::traits::{Keyed, TierPolicy};

use level::{CacheLevel, EntryArena};

#[cfg(feature = "concurrency")]
pub use concurrent::ConcurrentTieredCache;
pub use level::{DEFAULT_MAX_COUNT, DEFAULT_MAX_MEM_USAGE, LevelStats};
pub use policy::{DefaultPolicy, FnPolicy};

#[cfg(feature = "metrics")]
use crate::metrics::{
    MetricsReset, MetricsSnapshotProvider, TierMetricsReadRecorder, TierMetricsRecorder,
    TieredCacheMetrics, TieredCacheMetricsSnapshot,
};

/// A cached entry: the key, the value and the size last charged for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue<K, V> {
    pub data: V,
    key: K,
    last_mem_size: usize,
}

impl<K, V> KeyValue<K, V> {
    pub fn new(key: K, data: V) -> Self {
        Self {
            data,
            key,
            last_mem_size: 0,
        }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Size charged against the owning tier when the entry last joined it.
    #[inline]
    pub fn last_mem_size(&self) -> usize {
        self.last_mem_size
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.data)
    }
}

impl<K: Hash + Eq, V> Keyed for KeyValue<K, V> {
    type Key = K;

    #[inline]
    fn key(&self) -> &K {
        &self.key
    }
}

/// Multi-tier LRU cache with cascading eviction.
///
/// See the [module docs](self) for the tier model.
pub struct TieredCache<K, V, P, const L: usize> {
    arena: EntryArena<K, V>,
    levels: [CacheLevel<K, V>; L],
    policy: P,
    #[cfg(feature = "metrics")]
    metrics: TieredCacheMetrics,
}

impl<K, V, P, const L: usize> TieredCache<K, V, P, L>
where
    K: Hash + Eq,
    P: TierPolicy<K, V>,
{
    /// Creates a cache whose tiers use [`DEFAULT_MAX_COUNT`] and
    /// [`DEFAULT_MAX_MEM_USAGE`].
    ///
    /// # Panics
    ///
    /// Panics if `L == 0`.
    pub fn new(policy: P) -> Self {
        Self::with_capacity(policy, 0)
    }

    /// Like [`new`](Self::new), preallocating room for `capacity` entries.
    pub fn with_capacity(policy: P, capacity: usize) -> Self {
        assert!(L > 0, "a tiered cache needs at least one level");
        let mut arena = EntryArena::with_capacity(capacity);
        let levels = std::array::from_fn(|_| CacheLevel::new(&mut arena));
        Self {
            arena,
            levels,
            policy,
            #[cfg(feature = "metrics")]
            metrics: TieredCacheMetrics::default(),
        }
    }

    /// Sets the limits of `level`. Out-of-range levels are ignored.
    ///
    /// Lowering a limit does not evict immediately; the next insertion or
    /// relocation into the tier restores it.
    pub fn configure_level(&mut self, level: usize, max_count: usize, max_mem_usage: usize) {
        if let Some(tier) = self.levels.get_mut(level) {
            tier.max_count = max_count;
            tier.max_mem_usage = max_mem_usage;
        }
    }

    #[inline]
    pub fn level_count(&self) -> usize {
        L
    }

    /// Total number of entries across all tiers.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn level_stats(&self, level: usize) -> Option<LevelStats> {
        self.levels.get(level).map(CacheLevel::stats)
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    fn locate<Q>(&self, key: &Q) -> Option<(usize, SlotId)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.levels
            .iter()
            .enumerate()
            .find_map(|(level, tier)| tier.dict.get(&self.arena, key).map(|id| (level, id)))
    }

    /// Returns the tier currently holding `key`.
    pub fn level_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.locate(key).map(|(level, _)| level)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.locate(key).is_some()
    }

    /// Looks up `key` in every tier without touching recency.
    pub fn find_entry<Q>(&self, key: &Q) -> Option<&KeyValue<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let found = self.locate(key).and_then(|(_, id)| self.arena.get(id));
        #[cfg(feature = "metrics")]
        {
            if found.is_some() {
                (&self.metrics).record_find_hit();
            } else {
                (&self.metrics).record_find_miss();
            }
        }
        found
    }

    pub fn find_ptr<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_entry(key).map(|entry| &entry.data)
    }

    /// Copy of the value for `key`, or `V::default()` when absent.
    pub fn find<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone + Default,
    {
        self.find_ptr(key).cloned().unwrap_or_default()
    }

    /// Iterates the entries of `level` from most to least recently used.
    ///
    /// Yields nothing for an out-of-range level.
    pub fn iter_level(&self, level: usize) -> impl Iterator<Item = &KeyValue<K, V>> + '_ {
        self.levels
            .get(level)
            .into_iter()
            .flat_map(move |tier| tier.list.iter(&self.arena).map(|(_, entry)| entry))
    }

    /// Removes `key` from whichever tier holds it.
    ///
    /// Only the owning tier's accounting changes; nothing cascades.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (level, id) = self.locate(key)?;
        self.levels[level].detach(&mut self.arena, id);
        let entry = self.arena.destroy(id)?;
        debug!(level, mem_size = entry.last_mem_size, "removed cache entry");
        #[cfg(feature = "metrics")]
        self.metrics.record_remove();
        Some(entry.data)
    }

    /// Drops every entry and zeroes the accounting of every tier.
    ///
    /// Tier limits are kept.
    pub fn clear(&mut self) {
        self.arena.clear();
        for tier in &mut self.levels {
            tier.count = 0;
            tier.mem_usage = 0;
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Walks every tier and checks its list, dictionary and accounting
    /// against each other.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut total = 0;
        for (level, tier) in self.levels.iter().enumerate() {
            let mut count = 0;
            let mut mem_usage: usize = 0;
            for (id, entry) in tier.list.iter(&self.arena) {
                count += 1;
                mem_usage = mem_usage.saturating_add(entry.last_mem_size);
                if tier.dict.get(&self.arena, entry.key()) != Some(id) {
                    return Err(InvariantError::new(format!(
                        "level {level}: list entry {id:?} not indexed by its dictionary"
                    )));
                }
                let elsewhere = self
                    .levels
                    .iter()
                    .enumerate()
                    .any(|(other, t)| other != level && t.dict.contains_key(&self.arena, entry.key()));
                if elsewhere {
                    return Err(InvariantError::new(format!(
                        "level {level}: entry {id:?} is present in more than one level"
                    )));
                }
            }
            if count != tier.count {
                return Err(InvariantError::new(format!(
                    "level {level}: count {} but list holds {count}",
                    tier.count
                )));
            }
            let indexed = tier.dict.len(&self.arena);
            if indexed != count {
                return Err(InvariantError::new(format!(
                    "level {level}: dictionary holds {indexed} but list holds {count}"
                )));
            }
            if mem_usage != tier.mem_usage {
                return Err(InvariantError::new(format!(
                    "level {level}: mem_usage {} but entries sum to {mem_usage}",
                    tier.mem_usage
                )));
            }
            total += count;
        }
        if total != self.arena.len() {
            return Err(InvariantError::new(format!(
                "levels hold {total} entries but arena holds {}",
                self.arena.len()
            )));
        }
        Ok(())
    }
}

impl<K, V, P, const L: usize> TieredCache<K, V, P, L>
where
    K: Hash + Eq + Clone,
    P: TierPolicy<K, V>,
{
    /// Looks up `key`, creating or relocating it as needed.
    ///
    /// `level` is clamped to `L - 1`. `None` keeps a hit in its current
    /// tier and places a miss in tier 0. Returns `None` only when the key
    /// was absent and the policy declined to create a value.
    pub fn get_key_value(&mut self, key: &K, level: Option<usize>) -> Option<&mut KeyValue<K, V>> {
        let requested = level.map(|level| level.min(L - 1));
        let id = match self.locate(key) {
            Some((current, id)) => {
                let target = requested.unwrap_or(current);
                if target == current {
                    self.levels[current].touch(&mut self.arena, id);
                    trace!(level = current, "refreshed cache entry");
                    #[cfg(feature = "metrics")]
                    self.metrics.record_refresh();
                } else {
                    self.relocate(id, current, target);
                    debug!(from = current, to = target, "relocated cache entry");
                    #[cfg(feature = "metrics")]
                    self.metrics.record_relocation();
                    self.ensure_level_limits(target);
                }
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                id
            },
            None => {
                let target = requested.unwrap_or(0);
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                let Some(data) = self.policy.new_value(key, target) else {
                    debug!(level = target, "policy declined to create a value");
                    #[cfg(feature = "metrics")]
                    self.metrics.record_factory_refusal();
                    return None;
                };
                let id = self.insert_new(key.clone(), data, target);
                self.ensure_level_limits(target);
                id
            },
        };
        self.arena.get_mut(id)
    }

    pub fn get_ptr(&mut self, key: &K, level: Option<usize>) -> Option<&mut V> {
        self.get_key_value(key, level).map(|entry| &mut entry.data)
    }

    /// Copy of the value after a [`get_ptr`](Self::get_ptr) lookup, or
    /// `V::default()` when the policy declined.
    pub fn get(&mut self, key: &K, level: Option<usize>) -> V
    where
        V: Clone + Default,
    {
        self.get_ptr(key, level).map(|value| value.clone()).unwrap_or_default()
    }

    fn insert_new(&mut self, key: K, data: V, level: usize) -> SlotId {
        let mut entry = KeyValue::new(key, data);
        entry.last_mem_size = self.policy.estimate_mem_size(&entry);
        let id = self.arena.insert(entry);
        self.levels[level].attach(&mut self.arena, id);
        trace!(level, count = self.levels[level].count, "inserted cache entry");
        #[cfg(feature = "metrics")]
        self.metrics.record_insert();
        id
    }
}

impl<K, V, P, const L: usize> TieredCache<K, V, P, L>
where
    K: Hash + Eq,
    P: TierPolicy<K, V>,
{
    /// Detaches `id` from `from`, lets the policy adapt it, and attaches it
    /// at the head of `to` with a fresh size estimate.
    fn relocate(&mut self, id: SlotId, from: usize, to: usize) {
        self.levels[from].detach(&mut self.arena, id);
        if let Some(entry) = self.arena.get_mut(id) {
            self.policy.on_level_changed(entry, from, to);
            let size = self.policy.estimate_mem_size(entry);
            entry.last_mem_size = size;
        }
        self.levels[to].attach(&mut self.arena, id);
    }

    /// Cascades LRU entries from `start` towards the last tier until every
    /// tier on the way is within its limits or holds a single entry.
    fn ensure_level_limits(&mut self, start: usize) {
        for level in start..L - 1 {
            let mut moved = 0usize;
            while self.levels[level].count > 1 && self.levels[level].is_over_capacity() {
                let Some(tail) = self.levels[level].list.tail(&self.arena) else {
                    break;
                };
                self.relocate(tail, level, level + 1);
                moved += 1;
                #[cfg(feature = "metrics")]
                self.metrics.record_cascade();
            }
            if moved > 0 {
                let tier = &self.levels[level];
                debug!(
                    level,
                    moved,
                    count = tier.count,
                    mem_usage = tier.mem_usage,
                    "cascaded entries to next level"
                );
            }
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P, const L: usize> TieredCache<K, V, P, L>
where
    K: Hash + Eq,
    P: TierPolicy<K, V>,
{
    pub fn metrics_snapshot(&self) -> TieredCacheMetricsSnapshot {
        TieredCacheMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            factory_refusals: self.metrics.factory_refusals,
            inserts: self.metrics.inserts,
            refreshes: self.metrics.refreshes,
            relocations: self.metrics.relocations,
            cascaded_entries: self.metrics.cascaded_entries,
            removes: self.metrics.removes,
            clears: self.metrics.clears,
            find_calls: self.metrics.find_calls.get(),
            find_hits: self.metrics.find_hits.get(),
            cache_len: self.len(),
            levels: self.levels.iter().map(CacheLevel::stats).collect(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P, const L: usize> MetricsSnapshotProvider<TieredCacheMetricsSnapshot>
    for TieredCache<K, V, P, L>
where
    K: Hash + Eq,
    P: TierPolicy<K, V>,
{
    fn snapshot(&self) -> TieredCacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P, const L: usize> MetricsReset for TieredCache<K, V, P, L> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

impl<K, V, P, const L: usize> fmt::Debug for TieredCache<K, V, P, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<usize> = self.levels.iter().map(|tier| tier.count).collect();
        f.debug_struct("TieredCache")
            .field("len", &self.arena.len())
            .field("level_counts", &counts)
            .finish_non_exhaustive()
    }
}
