//! Key streams for tiered-cache benchmarks.
//!
//! Seeded `StdRng` keeps runs reproducible across machines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tierkit::cache::TieredCache;
use tierkit::traits::TierPolicy;

#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Uniform random keys in `[0, universe)`.
    Uniform,
    /// Hot/cold split with a configurable hot fraction and hot access probability.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Sequential scan in `[0, universe)`.
    Scan,
}

#[derive(Debug, Clone, Copy)]
pub struct WorkloadSpec {
    pub universe: u64,
    pub workload: Workload,
    pub seed: u64,
}

impl WorkloadSpec {
    pub fn generator(self) -> WorkloadGenerator {
        WorkloadGenerator::new(self.universe, self.workload, self.seed)
    }
}

#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    universe: u64,
    workload: Workload,
    rng: StdRng,
    scan_pos: u64,
}

impl WorkloadGenerator {
    pub fn new(universe: u64, workload: Workload, seed: u64) -> Self {
        Self {
            universe: universe.max(1),
            workload,
            rng: StdRng::seed_from_u64(seed),
            scan_pos: 0,
        }
    }

    pub fn next_key(&mut self) -> u64 {
        match self.workload {
            Workload::Uniform => self.rng.gen_range(0..self.universe),
            Workload::Hotset {
                hot_fraction,
                hot_prob,
            } => {
                let hot_size = ((self.universe as f64) * hot_fraction.clamp(0.0, 1.0)).round() as u64;
                let hot_size = hot_size.clamp(1, self.universe);
                if hot_size == self.universe || self.rng.gen_bool(hot_prob.clamp(0.0, 1.0)) {
                    self.rng.gen_range(0..hot_size)
                } else {
                    self.rng.gen_range(hot_size..self.universe)
                }
            },
            Workload::Scan => {
                let key = self.scan_pos;
                self.scan_pos = (self.scan_pos + 1) % self.universe;
                key
            },
        }
    }
}

/// Where lookups landed during a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct TierHits {
    pub hot: u64,
    pub cold: u64,
    pub misses: u64,
}

impl TierHits {
    pub fn hot_rate(self) -> f64 {
        let total = self.hot + self.cold + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hot as f64 / total as f64
        }
    }
}

/// Drives `operations` lookups through `get_ptr`, classifying each by the
/// tier the key was found in beforehand.
pub fn run_tier_hits<V, P, const L: usize>(
    cache: &mut TieredCache<u64, V, P, L>,
    generator: &mut WorkloadGenerator,
    operations: usize,
) -> TierHits
where
    P: TierPolicy<u64, V>,
{
    let mut hits = TierHits::default();
    for _ in 0..operations {
        let key = generator.next_key();
        match cache.level_of(&key) {
            Some(0) => hits.hot += 1,
            Some(_) => hits.cold += 1,
            None => hits.misses += 1,
        }
        let _ = std::hint::black_box(cache.get_ptr(&key, None));
    }
    hits
}
