//! Shares a thumbnail cache between worker threads. Cold tiers keep
//! shrunken renditions, and each tier is bounded by bytes.
//!
//! Run with: `cargo run --example thumbnail_tiers --features concurrency`

use std::thread;

use tierkit::cache::{ConcurrentTieredCache, KeyValue};
use tierkit::traits::TierPolicy;

struct Thumbnails;

impl TierPolicy<u32, Vec<u8>> for Thumbnails {
    fn new_value(&mut self, id: &u32, _level: usize) -> Option<Vec<u8>> {
        // id 0 has no image
        (*id != 0).then(|| vec![(*id % 251) as u8; 4096])
    }

    fn on_level_changed(&mut self, entry: &mut KeyValue<u32, Vec<u8>>, old: usize, new: usize) {
        if new > old {
            let len = entry.data.len() >> (new - old);
            entry.data.truncate(len.max(1));
            entry.data.shrink_to_fit();
        }
    }

    fn estimate_mem_size(&self, entry: &KeyValue<u32, Vec<u8>>) -> usize {
        entry.data.capacity()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cache: ConcurrentTieredCache<u32, Vec<u8>, Thumbnails, 3> =
        ConcurrentTieredCache::new(Thumbnails);
    cache.configure_level(0, usize::MAX, 64 * 1024);
    cache.configure_level(1, usize::MAX, 64 * 1024);

    let workers: Vec<_> = (0..4u32)
        .map(|worker| {
            let cache = cache.clone();
            thread::spawn(move || {
                let mut bytes = 0usize;
                for i in 0..200u32 {
                    let id = (worker * 31 + i * 7) % 97;
                    bytes += cache.get_with(&id, None, |thumb| thumb.len()).unwrap_or(0);
                }
                bytes
            })
        })
        .collect();

    for (worker, handle) in workers.into_iter().enumerate() {
        match handle.join() {
            Ok(bytes) => tracing::info!(worker, bytes, "worker finished"),
            Err(_) => tracing::error!(worker, "worker panicked"),
        }
    }

    for level in 0..3 {
        if let Some(stats) = cache.level_stats(level) {
            println!(
                "tier {level}: {} thumbnails, {} bytes",
                stats.count, stats.mem_usage
            );
        }
    }
}
