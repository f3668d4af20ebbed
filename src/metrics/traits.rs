//! # Metrics Traits
//!
//! Recording, snapshotting and resetting are separate traits so the cache
//! only depends on the recorder while tests and benches read snapshots.
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │     TierMetricsRecorder      │  ← written by TieredCache (&mut paths)
//!   │  get hit/miss, refusal,      │
//!   │  insert, refresh, relocate,  │
//!   │  cascade, remove, clear      │
//!   └──────────────┬───────────────┘
//!                  │
//!   ┌──────────────┴───────────────┐
//!   │   TierMetricsReadRecorder    │  ← written by find/find_ptr (&self)
//!   └──────────────────────────────┘
//!
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsReset                 │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters written by the mutating paths of a tiered cache.
pub trait TierMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_factory_refusal(&mut self);
    fn record_insert(&mut self);
    fn record_refresh(&mut self);
    fn record_relocation(&mut self);
    fn record_cascade(&mut self);
    fn record_remove(&mut self);
    fn record_clear(&mut self);
}

/// Counters written by read-only lookups.
pub trait TierMetricsReadRecorder {
    fn record_find_hit(self);
    fn record_find_miss(self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
