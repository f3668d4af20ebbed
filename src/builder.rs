//! Builder for [`TieredCache`] with per-level limits.
//!
//! `build` applies limits the same way [`TieredCache::configure_level`]
//! does: out-of-range levels are dropped silently. `try_build` rejects them,
//! together with zero limits, as a [`ConfigError`].
//!
//! ## Example
//!
//! ```rust
//! use tierkit::builder::TieredCacheBuilder;
//! use tierkit::cache::DefaultPolicy;
//!
//! let cache = TieredCacheBuilder::<3>::new()
//!     .level(0, 128, 1 << 20)
//!     .level(1, 1024, 8 << 20)
//!     .try_build::<u64, String, _>(DefaultPolicy)
//!     .unwrap();
//! assert_eq!(cache.level_stats(0).unwrap().max_count, 128);
//! assert_eq!(cache.level_stats(2).unwrap().max_count, tierkit::cache::DEFAULT_MAX_COUNT);
//! ```

use std::hash::Hash;

use crate::cache::{DEFAULT_MAX_COUNT, DEFAULT_MAX_MEM_USAGE, TieredCache};
use crate::error::ConfigError;
use crate::traits::TierPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LevelLimits {
    max_count: usize,
    max_mem_usage: usize,
}

impl Default for LevelLimits {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            max_mem_usage: DEFAULT_MAX_MEM_USAGE,
        }
    }
}

/// Collects level limits before constructing a [`TieredCache`] with `L` levels.
#[derive(Debug, Clone)]
pub struct TieredCacheBuilder<const L: usize> {
    limits: [LevelLimits; L],
    capacity: usize,
    rejected: Vec<usize>,
}

impl<const L: usize> Default for TieredCacheBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const L: usize> TieredCacheBuilder<L> {
    /// Starts with every level at the default limits.
    pub fn new() -> Self {
        Self {
            limits: [LevelLimits::default(); L],
            capacity: 0,
            rejected: Vec::new(),
        }
    }

    /// Sets the entry and memory limits of `level`.
    pub fn level(mut self, level: usize, max_count: usize, max_mem_usage: usize) -> Self {
        match self.limits.get_mut(level) {
            Some(limits) => {
                *limits = LevelLimits {
                    max_count,
                    max_mem_usage,
                }
            },
            None => self.rejected.push(level),
        }
        self
    }

    /// Preallocates room for `capacity` entries across all levels.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds the cache, ignoring out-of-range levels.
    ///
    /// # Panics
    ///
    /// Panics if `L == 0`.
    pub fn build<K, V, P>(self, policy: P) -> TieredCache<K, V, P, L>
    where
        K: Hash + Eq,
        P: TierPolicy<K, V>,
    {
        let mut cache = TieredCache::with_capacity(policy, self.capacity);
        for (level, limits) in self.limits.iter().enumerate() {
            cache.configure_level(level, limits.max_count, limits.max_mem_usage);
        }
        cache
    }

    /// Validates the configuration, then builds the cache.
    pub fn try_build<K, V, P>(self, policy: P) -> Result<TieredCache<K, V, P, L>, ConfigError>
    where
        K: Hash + Eq,
        P: TierPolicy<K, V>,
    {
        if L == 0 {
            return Err(ConfigError::new("a tiered cache needs at least one level"));
        }
        if let Some(level) = self.rejected.first() {
            return Err(ConfigError::new(format!(
                "level {level} is out of range for a cache with {L} levels"
            )));
        }
        for (level, limits) in self.limits.iter().enumerate() {
            if limits.max_count == 0 {
                return Err(ConfigError::new(format!("level {level}: max_count must be > 0")));
            }
            if limits.max_mem_usage == 0 {
                return Err(ConfigError::new(format!(
                    "level {level}: max_mem_usage must be > 0"
                )));
            }
        }
        Ok(self.build(policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DefaultPolicy;

    #[test]
    fn build_applies_limits() {
        let cache = TieredCacheBuilder::<2>::new()
            .level(0, 4, 4096)
            .capacity(64)
            .build::<u32, u32, _>(DefaultPolicy);
        let stats = cache.level_stats(0).unwrap();
        assert_eq!((stats.max_count, stats.max_mem_usage), (4, 4096));
        assert_eq!(cache.level_stats(1).unwrap().max_mem_usage, DEFAULT_MAX_MEM_USAGE);
    }

    #[test]
    fn build_ignores_out_of_range_level() {
        let cache = TieredCacheBuilder::<2>::new()
            .level(7, 1, 1)
            .build::<u32, u32, _>(DefaultPolicy);
        assert_eq!(cache.level_count(), 2);
        assert_eq!(cache.level_stats(0).unwrap().max_count, DEFAULT_MAX_COUNT);
    }

    #[test]
    fn try_build_rejects_out_of_range_level() {
        let err = TieredCacheBuilder::<2>::new()
            .level(2, 1, 1)
            .try_build::<u32, u32, _>(DefaultPolicy)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn try_build_rejects_zero_limits() {
        let err = TieredCacheBuilder::<2>::new()
            .level(1, 0, 10)
            .try_build::<u32, u32, _>(DefaultPolicy)
            .unwrap_err();
        assert!(err.message().contains("max_count"));

        let err = TieredCacheBuilder::<2>::new()
            .level(0, 10, 0)
            .try_build::<u32, u32, _>(DefaultPolicy)
            .unwrap_err();
        assert!(err.message().contains("max_mem_usage"));
    }

    #[test]
    fn try_build_rejects_zero_levels() {
        let result = TieredCacheBuilder::<0>::new().try_build::<u32, u32, _>(DefaultPolicy);
        assert!(result.is_err());
    }
}
