#![no_main]

use libfuzzer_sys::fuzz_target;
use tierkit::ds::{HashSet, LinkArena};

// Fuzz membership of slot identities in a HashSet
fuzz_target!(|data: &[u8]| {
    let mut arena: LinkArena<u8, 1> = LinkArena::new();
    let set = HashSet::new(&mut arena, 0, 16);
    let mut ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let value = pair[1];
        match pair[0] % 4 {
            0 => {
                let id = arena.insert(value);
                ids.push(id);
                assert!(set.put(&mut arena, id));
                assert!(!set.put(&mut arena, id));
            }
            1 => {
                if !ids.is_empty() {
                    let id = ids[value as usize % ids.len()];
                    set.remove(&mut arena, id);
                    assert!(!set.contains(&arena, id));
                }
            }
            2 => {
                if !ids.is_empty() {
                    let id = ids.swap_remove(value as usize % ids.len());
                    arena.destroy(id);
                    assert!(!set.contains(&arena, id));
                }
            }
            3 => {
                let members = set.iter(&arena).count();
                assert_eq!(members, set.len(&arena));
                assert!(members <= ids.len());
            }
            _ => unreachable!(),
        }
    }

    arena.debug_validate_invariants();
});
