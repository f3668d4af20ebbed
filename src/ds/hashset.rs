//! Identity-keyed intrusive hash set.
//!
//! Membership is by slot identity: two slots holding equal payloads are
//! still distinct members. Buckets follow the same power-of-two sizing as
//! [`Dictionary`](crate::ds::dictionary::Dictionary) so both containers
//! index with `hash & (buckets - 1)`.

use std::fmt;
use std::hash::BuildHasher;

use rustc_hash::FxBuildHasher;

use crate::ds::arena::LinkArena;
use crate::ds::dictionary::{alloc_buckets, bucket_capacity};
use crate::ds::link::{Node, SentinelId};
use crate::ds::slot_arena::SlotId;

pub struct HashSet<S = FxBuildHasher> {
    buckets: Box<[SentinelId]>,
    field: usize,
    hasher: S,
}

impl HashSet {
    /// Creates a set sized for `buckets` (rounded up to a power of two, >= 16).
    ///
    /// # Panics
    ///
    /// Panics if `field >= N`.
    pub fn new<T, const N: usize>(arena: &mut LinkArena<T, N>, field: usize, buckets: usize) -> Self {
        Self::with_hasher(arena, field, buckets, FxBuildHasher)
    }
}

impl<S: BuildHasher> HashSet<S> {
    pub fn with_hasher<T, const N: usize>(
        arena: &mut LinkArena<T, N>,
        field: usize,
        buckets: usize,
        hasher: S,
    ) -> Self {
        assert!(field < N, "link field {field} out of range for {N} fields");
        Self {
            buckets: alloc_buckets(arena, bucket_capacity(buckets)),
            field,
            hasher,
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn bucket_of(&self, id: SlotId) -> SentinelId {
        let hash = self.hasher.hash_one(id) as usize;
        self.buckets[hash & (self.buckets.len() - 1)]
    }

    pub fn contains<T, const N: usize>(&self, arena: &LinkArena<T, N>, id: SlotId) -> bool {
        arena.is_linked(Node::slot(id, self.field))
            && arena.chain(self.bucket_of(id)).any(|member| member == id)
    }

    /// Adds `id`; returns `false` if it is already a member or does not exist.
    pub fn put<T, const N: usize>(&self, arena: &mut LinkArena<T, N>, id: SlotId) -> bool {
        if !arena.contains(id) || self.contains(arena, id) {
            return false;
        }
        arena.insert_before(Node::Sentinel(self.bucket_of(id)), Node::slot(id, self.field))
    }

    /// Removes `id` from the set; the slot stays alive.
    pub fn remove<T, const N: usize>(&self, arena: &mut LinkArena<T, N>, id: SlotId) -> bool {
        self.contains(arena, id) && arena.unlink(Node::slot(id, self.field))
    }

    pub fn is_empty<T, const N: usize>(&self, arena: &LinkArena<T, N>) -> bool {
        self.buckets
            .iter()
            .all(|sentinel| !arena.is_linked(Node::Sentinel(*sentinel)))
    }

    pub fn len<T, const N: usize>(&self, arena: &LinkArena<T, N>) -> usize {
        self.buckets
            .iter()
            .map(|sentinel| arena.chain(*sentinel).count())
            .sum()
    }

    pub fn iter<'a, T, const N: usize>(
        &'a self,
        arena: &'a LinkArena<T, N>,
    ) -> impl Iterator<Item = SlotId> + 'a {
        self.buckets
            .iter()
            .flat_map(move |sentinel| arena.chain(*sentinel))
    }

    pub fn unlink_all<T, const N: usize>(&self, arena: &mut LinkArena<T, N>) {
        for sentinel in self.buckets.iter() {
            let start = Node::Sentinel(*sentinel);
            while let Some(next) = arena.next_node(start) {
                arena.unlink(next);
            }
        }
    }

    pub fn delete_all<T, const N: usize>(&self, arena: &mut LinkArena<T, N>) -> usize {
        let mut deleted = 0;
        for sentinel in self.buckets.iter() {
            while let Some(id) = arena.next_slot(Node::Sentinel(*sentinel)) {
                arena.destroy(id);
                deleted += 1;
            }
        }
        deleted
    }

    pub fn release<T, const N: usize>(self, arena: &mut LinkArena<T, N>) {
        for sentinel in self.buckets.iter() {
            arena.free_sentinel(*sentinel);
        }
    }
}

impl<S> fmt::Debug for HashSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashSet")
            .field("buckets", &self.buckets.len())
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}
