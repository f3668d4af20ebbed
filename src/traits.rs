//! # Extension Traits
//!
//! Two seams connect user types to the intrusive containers and the tiered
//! cache:
//!
//! ```text
//!   ┌──────────────────────────────┐        ┌───────────────────────────────────┐
//!   │ Keyed                        │        │ TierPolicy<K, V>                  │
//!   │                              │        │                                   │
//!   │  type Key: Hash + Eq         │        │  new_value(&K, level) → Option<V> │
//!   │  key(&self) → &Key           │        │  on_level_changed(entry, old, new)│
//!   │                              │        │  estimate_mem_size(entry) → usize │
//!   │  used by: Dictionary         │        │                                   │
//!   └──────────────────────────────┘        │  used by: TieredCache             │
//!                                           └───────────────────────────────────┘
//! ```
//!
//! `Keyed` replaces a fixed key field: the dictionary projects the key out of
//! each payload instead of storing a copy. `TierPolicy` carries the three
//! customization points of a tiered cache as a policy object held by value.

use std::hash::Hash;
use std::mem;

use crate::cache::KeyValue;

/// A payload that exposes the key a [`Dictionary`](crate::ds::Dictionary)
/// indexes it by.
///
/// The key must not change while the payload is linked into a dictionary;
/// doing so leaves it in the wrong bucket.
pub trait Keyed {
    type Key: Hash + Eq;

    fn key(&self) -> &Self::Key;
}

/// Customization hooks for a [`TieredCache`](crate::cache::TieredCache).
///
/// # Example
///
/// ```
/// use tierkit::cache::{KeyValue, TieredCache};
/// use tierkit::traits::TierPolicy;
///
/// struct Thumbnails;
///
/// impl TierPolicy<u32, Vec<u8>> for Thumbnails {
///     fn new_value(&mut self, key: &u32, _level: usize) -> Option<Vec<u8>> {
///         (*key != 0).then(|| vec![0; 64])
///     }
///
///     fn on_level_changed(&mut self, entry: &mut KeyValue<u32, Vec<u8>>, _old: usize, new: usize) {
///         // colder tiers keep a smaller rendition
///         if new > 0 {
///             entry.data.truncate(16);
///         }
///     }
///
///     fn estimate_mem_size(&self, entry: &KeyValue<u32, Vec<u8>>) -> usize {
///         entry.data.len()
///     }
/// }
///
/// let mut cache: TieredCache<u32, Vec<u8>, Thumbnails, 2> = TieredCache::new(Thumbnails);
/// cache.configure_level(0, 1, usize::MAX);
///
/// cache.get_ptr(&1, None);
/// cache.get_ptr(&2, None);
/// assert_eq!(cache.level_of(&1), Some(1));
/// assert_eq!(cache.find_ptr(&1).map(Vec::len), Some(16));
/// assert!(cache.get_ptr(&0, None).is_none());
/// ```
pub trait TierPolicy<K, V> {
    /// Produces the value for a key that is in no tier; `None` declines and
    /// the lookup reports a miss.
    fn new_value(&mut self, key: &K, level: usize) -> Option<V>;

    /// Called after `entry` left tier `old_level` and before it joins
    /// `new_level`.
    fn on_level_changed(&mut self, entry: &mut KeyValue<K, V>, old_level: usize, new_level: usize) {
        let _ = (entry, old_level, new_level);
    }

    /// Approximate footprint charged against a tier's memory limit.
    fn estimate_mem_size(&self, entry: &KeyValue<K, V>) -> usize {
        let _ = entry;
        mem::size_of::<KeyValue<K, V>>()
    }
}

impl<K, V, P> TierPolicy<K, V> for Box<P>
where
    P: TierPolicy<K, V> + ?Sized,
{
    fn new_value(&mut self, key: &K, level: usize) -> Option<V> {
        (**self).new_value(key, level)
    }

    fn on_level_changed(&mut self, entry: &mut KeyValue<K, V>, old_level: usize, new_level: usize) {
        (**self).on_level_changed(entry, old_level, new_level)
    }

    fn estimate_mem_size(&self, entry: &KeyValue<K, V>) -> usize {
        (**self).estimate_mem_size(entry)
    }
}
