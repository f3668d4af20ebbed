#![no_main]

use libfuzzer_sys::fuzz_target;
use tierkit::ds::{LinkArena, List};

// Fuzz arbitrary operation sequences on two Lists sharing one arena
//
// Each slot has two link fields; list `a` and `b` use field 0 so moving a
// slot between them exercises unlink-before-insert, and list `c` uses field 1
// so membership there must be unaffected.
fuzz_target!(|data: &[u8]| {
    let mut arena: LinkArena<u8, 2> = LinkArena::new();
    let a = List::new(&mut arena, 0);
    let b = List::new(&mut arena, 0);
    let c = List::new(&mut arena, 1);
    let mut ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 9;
        let value = pair[1];
        let pick = |ids: &Vec<_>| (!ids.is_empty()).then(|| ids[value as usize % ids.len()]);

        match op {
            0 => {
                let id = arena.insert(value);
                ids.push(id);
                assert!(a.insert_head(&mut arena, id));
                assert_eq!(a.head(&arena), Some(id));
            }
            1 => {
                let id = arena.insert(value);
                ids.push(id);
                assert!(b.insert_tail(&mut arena, id));
                assert_eq!(b.tail(&arena), Some(id));
            }
            2 => {
                if let Some(id) = pick(&ids) {
                    if arena.contains(id) {
                        let anchor = b.head(&arena).filter(|head| *head != id);
                        b.insert_after(&mut arena, id, anchor);
                        assert!(b.contains(&arena, id));
                        assert!(!a.contains(&arena, id));
                    }
                }
            }
            3 => {
                if let Some(id) = pick(&ids) {
                    if arena.contains(id) {
                        c.insert_head(&mut arena, id);
                        assert!(c.contains(&arena, id));
                    }
                }
            }
            4 => {
                if let Some(id) = pick(&ids) {
                    let in_c = c.contains(&arena, id);
                    a.unlink(&mut arena, id);
                    assert!(!a.contains(&arena, id));
                    assert_eq!(c.contains(&arena, id), in_c);
                }
            }
            5 => {
                if let Some(id) = pick(&ids) {
                    arena.destroy(id);
                    assert!(!a.contains(&arena, id));
                    assert!(!b.contains(&arena, id));
                    assert!(!c.contains(&arena, id));
                }
            }
            6 => {
                let forward: Vec<_> = a.iter_ids(&arena).collect();
                let mut backward: Vec<_> = a.iter_ids(&arena).rev().collect();
                backward.reverse();
                assert_eq!(forward, backward);
                assert_eq!(forward.len(), a.len(&arena));
            }
            7 => {
                let before = arena.len();
                b.unlink_all(&mut arena);
                assert!(b.is_empty(&arena));
                assert_eq!(arena.len(), before);
            }
            8 => {
                let removed = c.delete_all(&mut arena);
                assert!(c.is_empty(&arena));
                assert!(removed <= ids.len());
            }
            _ => unreachable!(),
        }
    }

    arena.debug_validate_invariants();
    let total = a.len(&arena) + b.len(&arena);
    assert!(total <= arena.len());
});
