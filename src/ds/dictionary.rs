//! Chained hash dictionary over one link field of a [`LinkArena`].
//!
//! Each bucket is a sentinel; entries hashing to the bucket are chained
//! through the dictionary's link field. The key is projected from the
//! payload by [`Keyed`], so the dictionary stores no keys of its own.
//!
//! ```text
//!   buckets (power of two, >= 16)
//!   ┌───┐
//!   │ 0 │ ──► (empty)
//!   │ 1 │ ──► [id_3 "apple"] ◄──► [id_9 "kiwi"]    chain = collisions
//!   │ 2 │ ──► [id_1 "pear"]
//!   │ … │
//!   └───┘     index = hash(key) & (buckets - 1)
//! ```
//!
//! ## Behaviour
//! - `get` on a missing key returns `None`.
//! - `put` of a key already present returns `false` and changes nothing.
//! - `resize` only succeeds while the dictionary is empty.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use rustc_hash::FxBuildHasher;

use crate::ds::arena::LinkArena;
use crate::ds::link::{Node, SentinelId};
use crate::ds::slot_arena::SlotId;
use crate::traits::Keyed;

/// Bucket count used by [`Dictionary::new`].
pub const DEFAULT_BUCKETS: usize = 32;

/// Smallest bucket count a dictionary or hash set will use.
pub const MIN_BUCKETS: usize = 16;

/// Rounds `requested` up to a power of two, never below [`MIN_BUCKETS`].
pub fn bucket_capacity(requested: usize) -> usize {
    requested.max(MIN_BUCKETS).next_power_of_two()
}

/// Intrusive chained hash map from `T::Key` to a slot.
pub struct Dictionary<T, S = FxBuildHasher> {
    buckets: Box<[SentinelId]>,
    field: usize,
    hasher: S,
    _marker: PhantomData<fn(&T)>,
}

impl<T: Keyed> Dictionary<T> {
    /// Creates a dictionary with [`DEFAULT_BUCKETS`] buckets on link field `field`.
    ///
    /// # Panics
    ///
    /// Panics if `field >= N`.
    pub fn new<const N: usize>(arena: &mut LinkArena<T, N>, field: usize) -> Self {
        Self::with_buckets(arena, field, DEFAULT_BUCKETS)
    }

    /// Creates a dictionary sized for `buckets` (rounded by [`bucket_capacity`]).
    pub fn with_buckets<const N: usize>(
        arena: &mut LinkArena<T, N>,
        field: usize,
        buckets: usize,
    ) -> Self {
        Self::with_buckets_and_hasher(arena, field, buckets, FxBuildHasher)
    }
}

impl<T: Keyed, S: BuildHasher> Dictionary<T, S> {
    pub fn with_buckets_and_hasher<const N: usize>(
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
            _marker: PhantomData,
        }
    }

    pub fn field(&self) -> usize {
        self.field
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn bucket_of<Q>(&self, key: &Q) -> SentinelId
    where
        Q: Hash + ?Sized,
    {
        let hash = self.hasher.hash_one(key) as usize;
        self.buckets[hash & (self.buckets.len() - 1)]
    }

    fn find<Q, const N: usize>(&self, arena: &LinkArena<T, N>, key: &Q) -> Option<SlotId>
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        arena
            .chain(self.bucket_of(key))
            .find(|id| arena.get(*id).is_some_and(|entry| entry.key().borrow() == key))
    }

    /// Looks up the entry whose key equals `key`.
    pub fn get<Q, const N: usize>(&self, arena: &LinkArena<T, N>, key: &Q) -> Option<SlotId>
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(arena, key)
    }

    pub fn contains_key<Q, const N: usize>(&self, arena: &LinkArena<T, N>, key: &Q) -> bool
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(arena, key).is_some()
    }

    /// Links `id` into its bucket unless an entry with the same key exists.
    ///
    /// If `id` is currently in another dictionary on the same field it is
    /// moved. Returns `false` for an unknown slot or a duplicate key.
    pub fn put<const N: usize>(&self, arena: &mut LinkArena<T, N>, id: SlotId) -> bool {
        let bucket = {
            let Some(entry) = arena.get(id) else {
                return false;
            };
            if self.find(arena, entry.key()).is_some() {
                return false;
            }
            self.bucket_of(entry.key())
        };
        arena.insert_before(Node::Sentinel(bucket), Node::slot(id, self.field))
    }

    /// Unlinks the entry for `key` and returns its slot; the slot stays alive.
    pub fn remove<Q, const N: usize>(&self, arena: &mut LinkArena<T, N>, key: &Q) -> Option<SlotId>
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.find(arena, key)?;
        arena.unlink(Node::slot(id, self.field));
        Some(id)
    }

    /// Detaches `id` from this dictionary's field; a no-op if it is not linked.
    pub fn unlink<const N: usize>(&self, arena: &mut LinkArena<T, N>, id: SlotId) -> bool {
        arena.unlink(Node::slot(id, self.field))
    }

    /// Replaces the bucket array; only allowed while empty.
    pub fn resize<const N: usize>(&mut self, arena: &mut LinkArena<T, N>, buckets: usize) -> bool {
        if !self.is_empty(arena) {
            return false;
        }
        for sentinel in self.buckets.iter() {
            arena.free_sentinel(*sentinel);
        }
        self.buckets = alloc_buckets(arena, bucket_capacity(buckets));
        true
    }

    pub fn is_empty<const N: usize>(&self, arena: &LinkArena<T, N>) -> bool {
        self.buckets
            .iter()
            .all(|sentinel| !arena.is_linked(Node::Sentinel(*sentinel)))
    }

    /// Counts entries by walking every bucket.
    pub fn len<const N: usize>(&self, arena: &LinkArena<T, N>) -> usize {
        self.buckets
            .iter()
            .map(|sentinel| arena.chain(*sentinel).count())
            .sum()
    }

    /// Sums, per bucket, the chain length beyond the first entry.
    pub fn count_collisions<const N: usize>(&self, arena: &LinkArena<T, N>) -> usize {
        self.buckets
            .iter()
            .map(|sentinel| arena.chain(*sentinel).count().saturating_sub(1))
            .sum()
    }

    /// Iterates all entries, bucket by bucket.
    pub fn iter<'a, const N: usize>(
        &'a self,
        arena: &'a LinkArena<T, N>,
    ) -> impl Iterator<Item = (SlotId, &'a T)> + 'a {
        self.buckets.iter().flat_map(move |sentinel| {
            arena
                .chain(*sentinel)
                .filter_map(move |id| arena.get(id).map(|entry| (id, entry)))
        })
    }

    /// Detaches every entry without destroying it.
    pub fn unlink_all<const N: usize>(&self, arena: &mut LinkArena<T, N>) {
        for sentinel in self.buckets.iter() {
            let start = Node::Sentinel(*sentinel);
            while let Some(next) = arena.next_node(start) {
                arena.unlink(next);
            }
        }
    }

    /// Detaches and destroys every entry, returning how many were destroyed.
    pub fn delete_all<const N: usize>(&self, arena: &mut LinkArena<T, N>) -> usize {
        let mut deleted = 0;
        for sentinel in self.buckets.iter() {
            while let Some(id) = arena.next_slot(Node::Sentinel(*sentinel)) {
                arena.destroy(id);
                deleted += 1;
            }
        }
        deleted
    }

    /// Same as [`Dictionary::unlink_all`].
    pub fn clear<const N: usize>(&self, arena: &mut LinkArena<T, N>) {
        self.unlink_all(arena);
    }

    /// Detaches all entries and returns every bucket sentinel to the arena.
    pub fn release<const N: usize>(self, arena: &mut LinkArena<T, N>) {
        for sentinel in self.buckets.iter() {
            arena.free_sentinel(*sentinel);
        }
    }
}

impl<T, S> fmt::Debug for Dictionary<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("buckets", &self.buckets.len())
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

pub(crate) fn alloc_buckets<T, const N: usize>(
    arena: &mut LinkArena<T, N>,
    count: usize,
) -> Box<[SentinelId]> {
    (0..count).map(|_| arena.alloc_sentinel()).collect()
}
