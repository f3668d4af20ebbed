use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{TierMetricsReadRecorder, TierMetricsRecorder};

#[derive(Debug, Default)]
pub struct TieredCacheMetrics {
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

    pub find_calls: MetricsCell,
    pub find_hits: MetricsCell,
}

impl TieredCacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl TierMetricsRecorder for TieredCacheMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_factory_refusal(&mut self) {
        self.factory_refusals += 1;
    }

    fn record_insert(&mut self) {
        self.inserts += 1;
    }

    fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    fn record_relocation(&mut self) {
        self.relocations += 1;
    }

    fn record_cascade(&mut self) {
        self.cascaded_entries += 1;
    }

    fn record_remove(&mut self) {
        self.removes += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl TierMetricsReadRecorder for &TieredCacheMetrics {
    fn record_find_hit(self) {
        self.find_calls.incr();
        self.find_hits.incr();
    }

    fn record_find_miss(self) {
        self.find_calls.incr();
    }
}
