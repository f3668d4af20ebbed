#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use tierkit::ds::{Dictionary, LinkArena, SlotId};
use tierkit::traits::Keyed;

struct Entry {
    key: u16,
}

impl Keyed for Entry {
    type Key = u16;

    fn key(&self) -> &u16 {
        &self.key
    }
}

// Fuzz put/get/remove/destroy against a HashMap model
//
// Small bucket counts force long collision chains.
fuzz_target!(|data: &[u8]| {
    let Some((&buckets, ops)) = data.split_first() else {
        return;
    };
    let mut arena: LinkArena<Entry, 1> = LinkArena::new();
    let dict = Dictionary::with_buckets(&mut arena, 0, buckets as usize);
    let mut model: HashMap<u16, SlotId> = HashMap::new();

    for chunk in ops.chunks_exact(3) {
        let key = u16::from_le_bytes([chunk[1], chunk[2]]) % 512;
        match chunk[0] % 4 {
            0 => {
                let id = arena.insert(Entry { key });
                let inserted = dict.put(&mut arena, id);
                assert_eq!(inserted, !model.contains_key(&key));
                if inserted {
                    model.insert(key, id);
                } else {
                    arena.destroy(id);
                }
            }
            1 => {
                assert_eq!(dict.get(&arena, &key), model.get(&key).copied());
            }
            2 => {
                let removed = dict.remove(&mut arena, &key);
                assert_eq!(removed, model.remove(&key));
                if let Some(id) = removed {
                    arena.destroy(id);
                }
            }
            3 => {
                if let Some(id) = model.remove(&key) {
                    arena.destroy(id);
                    assert!(!dict.contains_key(&arena, &key));
                }
            }
            _ => unreachable!(),
        }
    }

    assert_eq!(dict.len(&arena), model.len());
    arena.debug_validate_invariants();
});
