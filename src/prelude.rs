pub use crate::builder::TieredCacheBuilder;
pub use crate::cache::{DefaultPolicy, FnPolicy, KeyValue, LevelStats, TieredCache};
pub use crate::ds::{Dictionary, HashSet, LinkArena, List, Node, SentinelId, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::traits::{Keyed, TierPolicy};

#[cfg(feature = "concurrency")]
pub use crate::cache::ConcurrentTieredCache;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::TieredCacheMetricsSnapshot;
