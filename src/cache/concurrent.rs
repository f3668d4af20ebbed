//! Mutex-guarded handle to a [`TieredCache`] (`concurrency` feature).
//!
//! The cache itself does no locking. This wrapper serializes every call
//! through one `parking_lot::Mutex` and hands out values through closures,
//! so no reference into the arena outlives the guard.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{LevelStats, TieredCache};
use crate::traits::TierPolicy;

#[cfg(feature = "metrics")]
use crate::metrics::{MetricsSnapshotProvider, TieredCacheMetricsSnapshot};

/// Cloneable, thread-safe handle; clones share the same cache.
pub struct ConcurrentTieredCache<K, V, P, const L: usize> {
    inner: Arc<Mutex<TieredCache<K, V, P, L>>>,
}

impl<K, V, P, const L: usize> Clone for ConcurrentTieredCache<K, V, P, L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, P, const L: usize> ConcurrentTieredCache<K, V, P, L>
where
    K: Hash + Eq + Clone + Send,
    V: Send,
    P: TierPolicy<K, V> + Send,
{
    /// # Example
    ///
    /// ```
    /// use tierkit::cache::{ConcurrentTieredCache, DefaultPolicy};
    ///
    /// let cache: ConcurrentTieredCache<u64, String, DefaultPolicy, 2> =
    ///     ConcurrentTieredCache::new(DefaultPolicy);
    /// let len = cache.get_with(&7, None, |value| {
    ///     value.push_str("seven");
    ///     value.len()
    /// });
    /// assert_eq!(len, Some(5));
    /// assert_eq!(cache.find_with(&7, |value| value.clone()), Some("seven".to_string()));
    /// ```
    pub fn new(policy: P) -> Self {
        Self::from_cache(TieredCache::new(policy))
    }

    pub fn from_cache(cache: TieredCache<K, V, P, L>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Runs [`TieredCache::get_ptr`] and applies `f` to the value under the lock.
    ///
    /// The lock is not reentrant: calling back into this cache (or a clone of
    /// the handle) from `f` deadlocks.
    pub fn get_with<R>(&self, key: &K, level: Option<usize>, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        let mut cache = self.inner.lock();
        cache.get_ptr(key, level).map(f)
    }

    /// Runs [`TieredCache::find_ptr`] and applies `f` to the value under the lock.
    ///
    /// As with [`get_with`](Self::get_with), `f` must not touch this cache.
    pub fn find_with<Q, R>(&self, key: &Q, f: impl FnOnce(&V) -> R) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let cache = self.inner.lock();
        cache.find_ptr(key).map(f)
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    pub fn level_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().level_of(key)
    }

    pub fn configure_level(&self, level: usize, max_count: usize, max_mem_usage: usize) {
        self.inner.lock().configure_level(level, max_count, max_mem_usage);
    }

    pub fn level_stats(&self, level: usize) -> Option<LevelStats> {
        self.inner.lock().level_stats(level)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs `f` with exclusive access to the underlying cache.
    ///
    /// `f` must not call other methods on this handle.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut TieredCache<K, V, P, L>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P, const L: usize> ConcurrentTieredCache<K, V, P, L>
where
    K: Hash + Eq + Clone + Send,
    V: Send,
    P: TierPolicy<K, V> + Send,
{
    pub fn metrics_snapshot(&self) -> TieredCacheMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P, const L: usize> MetricsSnapshotProvider<TieredCacheMetricsSnapshot>
    for ConcurrentTieredCache<K, V, P, L>
where
    K: Hash + Eq + Clone + Send,
    V: Send,
    P: TierPolicy<K, V> + Send,
{
    fn snapshot(&self) -> TieredCacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V, P, const L: usize> fmt::Debug for ConcurrentTieredCache<K, V, P, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentTieredCache").finish_non_exhaustive()
    }
}
