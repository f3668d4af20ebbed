//! Error types for tierkit.
//!
//! Container operations never fail with an error: lookups report absence
//! with `None` and duplicate inserts with `false`. The two error types here
//! cover the remaining cases.
//!
//! - [`InvariantError`]: a tiered cache's lists, dictionaries and accounting
//!   disagree ([`TieredCache::check_invariants`](crate::cache::TieredCache::check_invariants)).
//! - [`ConfigError`]: level limits handed to the builder are unusable
//!   (zero limits, levels out of range).
//!
//! ## Example Usage
//!
//! ```
//! use tierkit::builder::TieredCacheBuilder;
//! use tierkit::cache::DefaultPolicy;
//!
//! let ok = TieredCacheBuilder::<2>::new()
//!     .level(0, 16, 1 << 16)
//!     .try_build::<u32, u32, _>(DefaultPolicy);
//! assert!(ok.is_ok());
//!
//! // Zero limits are caught without panicking
//! let bad = TieredCacheBuilder::<2>::new()
//!     .level(0, 0, 1 << 16)
//!     .try_build::<u32, u32, _>(DefaultPolicy);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when a tiered cache's internal bookkeeping is inconsistent.
///
/// Carries a description naming the level and the check that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned by [`TieredCacheBuilder::try_build`](crate::builder::TieredCacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use tierkit::builder::TieredCacheBuilder;
/// use tierkit::cache::DefaultPolicy;
///
/// let err = TieredCacheBuilder::<2>::new()
///     .level(5, 10, 10)
///     .try_build::<u64, u64, _>(DefaultPolicy)
///     .unwrap_err();
/// assert!(err.to_string().contains("level 5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
