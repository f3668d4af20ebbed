//! Walks a three-level cache through inserts, a cascade, a promotion and a
//! removal, logging each step.
//!
//! Run with: `RUST_LOG=tierkit=debug cargo run --example basic_tiered`

use tierkit::builder::TieredCacheBuilder;
use tierkit::cache::FnPolicy;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let policy = FnPolicy::new(|name: &String, level| {
        Some(format!("profile of {name} (created in tier {level})"))
    });
    let mut cache = TieredCacheBuilder::<3>::new()
        .level(0, 2, usize::MAX)
        .level(1, 2, usize::MAX)
        .build::<String, String, _>(policy);

    for name in ["ada", "grace", "barbara", "edsger", "tony"] {
        let profile = cache.get(&name.to_string(), None);
        tracing::info!(%name, %profile, "looked up");
    }
    print_levels(&cache);

    // pull the oldest entry back into the hot tier
    cache.get_ptr(&"ada".to_string(), Some(0));
    tracing::info!(level = ?cache.level_of("ada"), "promoted ada");
    print_levels(&cache);

    if let Some(profile) = cache.remove("grace") {
        tracing::info!(%profile, "removed grace");
    }
    print_levels(&cache);

    if let Err(err) = cache.check_invariants() {
        tracing::error!(%err, "cache is inconsistent");
    }
}

fn print_levels<P>(cache: &tierkit::TieredCache<String, String, P, 3>)
where
    P: tierkit::traits::TierPolicy<String, String>,
{
    for level in 0..cache.level_count() {
        let keys: Vec<&str> = cache.iter_level(level).map(|e| e.key().as_str()).collect();
        println!("tier {level}: {keys:?}");
    }
}
