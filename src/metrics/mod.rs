//! Optional counters for the tiered cache (`metrics` feature).

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::TieredCacheMetrics;
pub use snapshot::TieredCacheMetricsSnapshot;
pub use traits::{
    MetricsReset, MetricsSnapshotProvider, TierMetricsReadRecorder, TierMetricsRecorder,
};
