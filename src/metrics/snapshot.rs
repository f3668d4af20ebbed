use crate::cache::LevelStats;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TieredCacheMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub factory_refusals: u64,
    pub inserts: u64,
    pub refreshes: u64,
    pub relocations: u64,
    pub cascaded_entries: u64,
    pub removes: u64,
    pub clears: u64,

    pub find_calls: u64,
    pub find_hits: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub levels: Vec<LevelStats>,
}

impl TieredCacheMetricsSnapshot {
    /// Fraction of `get` calls served from an existing entry.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }

    /// Total memory charged across all tiers.
    pub fn mem_usage(&self) -> usize {
        self.levels.iter().map(|level| level.mem_usage).sum()
    }
}
