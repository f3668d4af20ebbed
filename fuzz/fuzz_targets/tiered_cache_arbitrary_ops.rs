#![no_main]

use libfuzzer_sys::fuzz_target;
use tierkit::cache::{FnPolicy, TieredCache};

// Fuzz get/find/remove/configure sequences on a three-level cache
//
// Values are byte vectors sized by the key so memory limits matter too.
fuzz_target!(|data: &[u8]| {
    let policy = FnPolicy::new(|key: &u8, _level| (*key != 0xff).then(|| vec![0u8; *key as usize]));
    let mut cache: TieredCache<u8, Vec<u8>, _, 3> = TieredCache::new(policy);
    cache.configure_level(0, 4, 512);
    cache.configure_level(1, 8, 2048);

    for chunk in data.chunks_exact(3) {
        let key = chunk[1];
        match chunk[0] % 5 {
            0 => {
                let got = cache.get_ptr(&key, None).map(|v| v.len());
                assert_eq!(got, (key != 0xff).then_some(key as usize));
            }
            1 => {
                let level = (chunk[2] % 4) as usize;
                if cache.get_ptr(&key, Some(level)).is_some() {
                    assert_eq!(cache.level_of(&key), Some(level.min(2)));
                }
            }
            2 => {
                let before = cache.len();
                let found = cache.find_ptr(&key).is_some();
                assert_eq!(cache.len(), before);
                assert_eq!(found, cache.contains(&key));
            }
            3 => {
                let present = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), present);
                assert!(!cache.contains(&key));
            }
            4 => {
                let level = (chunk[2] % 4) as usize;
                cache.configure_level(level, (chunk[2] as usize % 8) + 1, usize::MAX);
            }
            _ => unreachable!(),
        }
        assert!(cache.check_invariants().is_ok());
    }
});
