// ==============================================
// SHARED-ARENA CONTAINER TESTS (integration)
// ==============================================
//
// One payload threaded into a List, a Dictionary and a HashSet at once,
// each on its own link field.

use tierkit::ds::{Dictionary, HashSet, LinkArena, List};
use tierkit::traits::Keyed;

const LRU: usize = 0;
const INDEX: usize = 1;
const DIRTY: usize = 2;

#[derive(Debug)]
struct Page {
    number: u32,
}

impl Keyed for Page {
    type Key = u32;

    fn key(&self) -> &u32 {
        &self.number
    }
}

struct Pool {
    arena: LinkArena<Page, 3>,
    lru: List,
    index: Dictionary<Page>,
    dirty: HashSet,
}

impl Pool {
    fn new() -> Self {
        let mut arena = LinkArena::new();
        let lru = List::new(&mut arena, LRU);
        let index = Dictionary::new(&mut arena, INDEX);
        let dirty = HashSet::new(&mut arena, DIRTY, 16);
        Self {
            arena,
            lru,
            index,
            dirty,
        }
    }

    fn load(&mut self, number: u32) {
        let id = self.arena.insert(Page { number });
        self.lru.insert_head(&mut self.arena, id);
        assert!(self.index.put(&mut self.arena, id));
    }
}

#[test]
fn destroy_unlinks_every_field() {
    let mut pool = Pool::new();
    for n in 0..8 {
        pool.load(n);
    }
    let id = pool.index.get(&pool.arena, &3).unwrap();
    pool.dirty.put(&mut pool.arena, id);
    assert!(pool.dirty.contains(&pool.arena, id));

    let page = pool.arena.destroy(id).unwrap();
    assert_eq!(page.number, 3);
    assert!(pool.index.get(&pool.arena, &3).is_none());
    assert!(pool.dirty.is_empty(&pool.arena));
    assert_eq!(pool.lru.len(&pool.arena), 7);
    assert!(pool.lru.iter(&pool.arena).all(|(_, page)| page.number != 3));
    #[cfg(debug_assertions)]
    pool.arena.debug_validate_invariants();
}

#[test]
fn fields_are_independent() {
    let mut pool = Pool::new();
    for n in 0..4 {
        pool.load(n);
    }
    let tail = pool.lru.tail(&pool.arena).unwrap();
    pool.lru.unlink(&mut pool.arena, tail);

    // off the recency list but still indexed
    let number = pool.arena.get(tail).unwrap().number;
    assert_eq!(number, 0);
    assert_eq!(pool.index.get(&pool.arena, &0), Some(tail));

    pool.lru.insert_head(&mut pool.arena, tail);
    let order: Vec<u32> = pool.lru.iter(&pool.arena).map(|(_, p)| p.number).collect();
    assert_eq!(order, vec![0, 3, 2, 1]);
}

#[test]
fn collisions_appear_once_entries_outnumber_buckets() {
    let mut arena: LinkArena<Page, 1> = LinkArena::new();
    let index = Dictionary::with_buckets(&mut arena, 0, 16);
    assert_eq!(index.bucket_count(), 16);
    for number in 0..16 {
        let id = arena.insert(Page { number });
        index.put(&mut arena, id);
    }
    let id = arena.insert(Page { number: 16 });
    index.put(&mut arena, id);
    assert!(index.count_collisions(&arena) > 0);
    assert_eq!(index.len(&arena), 17);
}

#[test]
fn release_returns_sentinels() {
    let mut pool = Pool::new();
    pool.load(1);
    let sentinels = pool.arena.sentinel_count();
    assert_eq!(sentinels, 1 + 32 + 16);

    let Pool {
        mut arena,
        lru,
        index,
        dirty,
    } = pool;
    lru.release(&mut arena);
    index.release(&mut arena);
    dirty.release(&mut arena);
    assert_eq!(arena.sentinel_count(), 0);
    // payload survives; only its links were cleared
    assert_eq!(arena.len(), 1);
    #[cfg(debug_assertions)]
    arena.debug_validate_invariants();
}
