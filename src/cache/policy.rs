//! Ready-made [`TierPolicy`] implementations.

use std::fmt;
use std::marker::PhantomData;

use crate::traits::TierPolicy;

/// Creates `V::default()` for every miss and never reacts to tier changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl<K, V: Default> TierPolicy<K, V> for DefaultPolicy {
    fn new_value(&mut self, _key: &K, _level: usize) -> Option<V> {
        Some(V::default())
    }
}

/// Adapts a closure `FnMut(&K, usize) -> Option<V>` into a policy.
///
/// Tier changes are ignored and sizes use the default estimate.
///
/// ```
/// use tierkit::cache::{FnPolicy, TieredCache};
///
/// let policy = FnPolicy::new(|key: &String, _level| Some(key.len()));
/// let mut cache: TieredCache<String, usize, _, 2> = TieredCache::new(policy);
/// assert_eq!(cache.get(&"hello".to_string(), None), 5);
/// ```
pub struct FnPolicy<K, V, F> {
    factory: F,
    _marker: PhantomData<fn(&K) -> V>,
}

impl<K, V, F> FnPolicy<K, V, F>
where
    F: FnMut(&K, usize) -> Option<V>,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            _marker: PhantomData,
        }
    }
}

impl<K, V, F> TierPolicy<K, V> for FnPolicy<K, V, F>
where
    F: FnMut(&K, usize) -> Option<V>,
{
    fn new_value(&mut self, key: &K, level: usize) -> Option<V> {
        (self.factory)(key, level)
    }
}

impl<K, V, F> fmt::Debug for FnPolicy<K, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPolicy").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::KeyValue;

    #[test]
    fn default_policy_creates_default_values() {
        let mut policy = DefaultPolicy;
        let value: Option<String> = TierPolicy::<u32, String>::new_value(&mut policy, &1, 0);
        assert_eq!(value, Some(String::new()));
    }

    #[test]
    fn default_size_estimate_is_entry_size() {
        let policy = DefaultPolicy;
        let entry = KeyValue::new(1u64, 2u64);
        assert_eq!(
            TierPolicy::<u64, u64>::estimate_mem_size(&policy, &entry),
            std::mem::size_of::<KeyValue<u64, u64>>()
        );
    }

    #[test]
    fn fn_policy_forwards_key_and_level() {
        let mut seen = Vec::new();
        {
            let mut policy = FnPolicy::new(|key: &u32, level| {
                seen.push((*key, level));
                (*key % 2 == 0).then_some(*key * 10)
            });
            assert_eq!(policy.new_value(&4, 1), Some(40));
            assert_eq!(policy.new_value(&3, 0), None);
        }
        assert_eq!(seen, vec![(4, 1), (3, 0)]);
    }
}
