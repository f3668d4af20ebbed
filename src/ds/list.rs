//! Ordered view over one link field of a [`LinkArena`].
//!
//! A `List` is just a sentinel plus the index of the link field it threads.
//! Members stay owned by the arena; the list only orders them.
//!
//! ```text
//!           head                          tail
//!   [S] ──► [id_2] ◄──► [id_0] ◄──► [id_5] ◄── [S]
//!    └──────────────── circular ────────────────┘
//! ```
//!
//! ## Operations
//! - `insert_head` / `insert_tail` / `insert_before` / `insert_after`: O(1)
//! - `head` / `tail` / `next` / `prev`: O(1)
//! - `unlink_all` / `delete_all` / `len` / `iter`: O(n)
//!
//! Inserting a slot that is already in another list on the same field moves
//! it; each field can belong to only one chain at a time.

use crate::ds::arena::LinkArena;
use crate::ds::link::{Chain, Node, SentinelId};
use crate::ds::slot_arena::SlotId;

#[derive(Debug, PartialEq, Eq)]
pub struct List {
    sentinel: SentinelId,
    field: usize,
}

impl List {
    /// Creates an empty list threading link field `field`.
    ///
    /// # Panics
    ///
    /// Panics if `field >= N`.
    pub fn new<T, const N: usize>(arena: &mut LinkArena<T, N>, field: usize) -> Self {
        assert!(field < N, "link field {field} out of range for {N} fields");
        Self {
            sentinel: arena.alloc_sentinel(),
            field,
        }
    }

    /// The link field this list threads.
    pub fn field(&self) -> usize {
        self.field
    }

    #[inline]
    fn node(&self, id: SlotId) -> Node {
        Node::slot(id, self.field)
    }

    #[inline]
    fn start(&self) -> Node {
        Node::Sentinel(self.sentinel)
    }

    pub fn is_empty<T, const N: usize>(&self, arena: &LinkArena<T, N>) -> bool {
        !arena.is_linked(self.start())
    }

    /// Counts members by walking the chain.
    pub fn len<T, const N: usize>(&self, arena: &LinkArena<T, N>) -> usize {
        arena.chain(self.sentinel).count()
    }

    /// Returns `true` if `id` is a member of this list.
    pub fn contains<T, const N: usize>(&self, arena: &LinkArena<T, N>, id: SlotId) -> bool {
        arena.is_linked(self.node(id)) && arena.chain(self.sentinel).any(|member| member == id)
    }

    pub fn insert_head<T, const N: usize>(&self, arena: &mut LinkArena<T, N>, id: SlotId) -> bool {
        arena.insert_after(self.start(), self.node(id))
    }

    pub fn insert_tail<T, const N: usize>(&self, arena: &mut LinkArena<T, N>, id: SlotId) -> bool {
        arena.insert_before(self.start(), self.node(id))
    }

    /// Inserts `id` before `anchor`; with no anchor, at the tail.
    pub fn insert_before<T, const N: usize>(
        &self,
        arena: &mut LinkArena<T, N>,
        id: SlotId,
        anchor: Option<SlotId>,
    ) -> bool {
        match anchor {
            Some(anchor) => arena.insert_before(self.node(anchor), self.node(id)),
            None => self.insert_tail(arena, id),
        }
    }

    /// Inserts `id` after `anchor`; with no anchor, at the tail.
    pub fn insert_after<T, const N: usize>(
        &self,
        arena: &mut LinkArena<T, N>,
        id: SlotId,
        anchor: Option<SlotId>,
    ) -> bool {
        match anchor {
            Some(anchor) => arena.insert_after(self.node(anchor), self.node(id)),
            None => self.insert_tail(arena, id),
        }
    }

    /// Detaches `id` from this list's field; a no-op if it is not linked.
    pub fn unlink<T, const N: usize>(&self, arena: &mut LinkArena<T, N>, id: SlotId) -> bool {
        arena.unlink(self.node(id))
    }

    pub fn head<T, const N: usize>(&self, arena: &LinkArena<T, N>) -> Option<SlotId> {
        arena.next_slot(self.start())
    }

    pub fn tail<T, const N: usize>(&self, arena: &LinkArena<T, N>) -> Option<SlotId> {
        arena.prev_slot(self.start())
    }

    /// Member after `id`, or `None` at the tail.
    pub fn next<T, const N: usize>(&self, arena: &LinkArena<T, N>, id: SlotId) -> Option<SlotId> {
        arena.next_slot(self.node(id))
    }

    /// Member before `id`, or `None` at the head.
    pub fn prev<T, const N: usize>(&self, arena: &LinkArena<T, N>, id: SlotId) -> Option<SlotId> {
        arena.prev_slot(self.node(id))
    }

    /// Returns member ids from head to tail; `.rev()` walks tail to head.
    pub fn iter_ids<'a, T, const N: usize>(&self, arena: &'a LinkArena<T, N>) -> Chain<'a, T, N> {
        arena.chain(self.sentinel)
    }

    /// Returns `(SlotId, &T)` pairs from head to tail.
    pub fn iter<'a, T, const N: usize>(
        &self,
        arena: &'a LinkArena<T, N>,
    ) -> impl DoubleEndedIterator<Item = (SlotId, &'a T)> + 'a {
        arena
            .chain(self.sentinel)
            .filter_map(move |id| arena.get(id).map(|value| (id, value)))
    }

    /// Detaches every member without destroying it.
    pub fn unlink_all<T, const N: usize>(&self, arena: &mut LinkArena<T, N>) {
        while let Some(id) = self.head(arena) {
            arena.unlink(self.node(id));
        }
    }

    /// Detaches and destroys every member, returning how many were destroyed.
    pub fn delete_all<T, const N: usize>(&self, arena: &mut LinkArena<T, N>) -> usize {
        let mut deleted = 0;
        while let Some(id) = self.head(arena) {
            arena.destroy(id);
            deleted += 1;
        }
        deleted
    }

    /// Same as [`List::unlink_all`].
    pub fn clear<T, const N: usize>(&self, arena: &mut LinkArena<T, N>) {
        self.unlink_all(arena);
    }

    /// Detaches all members and returns the sentinel to the arena.
    pub fn release<T, const N: usize>(self, arena: &mut LinkArena<T, N>) {
        arena.free_sentinel(self.sentinel);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants<T, const N: usize>(&self, arena: &LinkArena<T, N>) {
        let forward: Vec<_> = self.iter_ids(arena).collect();
        let mut backward: Vec<_> = self.iter_ids(arena).rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);

        let mut seen = std::collections::HashSet::new();
        for id in &forward {
            assert!(seen.insert(*id), "slot {id:?} appears twice");
            assert!(arena.contains(*id));
        }
        assert_eq!(self.head(arena), forward.first().copied());
        assert_eq!(self.tail(arena), forward.last().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK1: usize = 0;
    const LINK2: usize = 1;

    fn values(list: &List, arena: &LinkArena<&'static str, 2>) -> Vec<&'static str> {
        list.iter(arena).map(|(_, v)| *v).collect()
    }

    #[test]
    fn empty_list_has_no_ends() {
        let mut arena: LinkArena<&str, 2> = LinkArena::new();
        let list = List::new(&mut arena, LINK1);
        assert!(list.is_empty(&arena));
        assert_eq!(list.head(&arena), None);
        assert_eq!(list.tail(&arena), None);
        assert_eq!(list.len(&arena), 0);
    }

    #[test]
    fn insert_head_orders_mru_first() {
        let mut arena: LinkArena<&str, 2> = LinkArena::new();
        let list = List::new(&mut arena, LINK1);
        let x = arena.insert("x");
        let y = arena.insert("y");

        list.insert_head(&mut arena, x);
        list.insert_head(&mut arena, y);

        assert_eq!(list.head(&arena), Some(y));
        assert_eq!(list.next(&arena, y), Some(x));
        assert_eq!(list.next(&arena, x), None);
        assert_eq!(list.prev(&arena, y), None);
        assert_eq!(list.tail(&arena), Some(x));
        list.debug_validate_invariants(&arena);
    }

    #[test]
    fn unlink_all_and_delete_all() {
        let mut arena: LinkArena<&str, 2> = LinkArena::new();
        let l1 = List::new(&mut arena, LINK1);
        let l2 = List::new(&mut arena, LINK1);

        let mut items1 = Vec::new();
        let mut items2 = Vec::new();
        for i in 0..100 {
            let a = arena.insert("a");
            let b = arena.insert("b");
            l1.insert_head(&mut arena, a);
            l2.insert_tail(&mut arena, b);
            assert_eq!(l1.head(&arena), Some(a));
            assert_eq!(l2.tail(&arena), Some(b));
            items1.push(a);
            items2.push(b);
            assert_eq!(l1.len(&arena), i + 1);
        }

        l1.unlink_all(&mut arena);
        assert!(l1.is_empty(&arena));
        assert!(items1.iter().all(|id| arena.contains(*id)));

        assert_eq!(l2.delete_all(&mut arena), 100);
        assert!(l2.is_empty(&arena));
        assert!(items2.iter().all(|id| !arena.contains(*id)));
        assert_eq!(arena.len(), 100);
    }

    #[test]
    fn destroying_members_updates_ends() {
        let mut arena: LinkArena<&str, 2> = LinkArena::new();
        let list = List::new(&mut arena, LINK1);
        let n1 = arena.insert("node1");
        let n2 = arena.insert("node2");
        let n3 = arena.insert("node3");
        list.insert_head(&mut arena, n3);
        list.insert_head(&mut arena, n2);
        list.insert_head(&mut arena, n1);

        assert_eq!(list.head(&arena), Some(n1));
        assert_eq!(list.tail(&arena), Some(n3));

        arena.destroy(n2);
        arena.destroy(n3);
        assert_eq!(list.head(&arena), Some(n1));
        assert_eq!(list.tail(&arena), Some(n1));

        arena.destroy(n1);
        assert_eq!(list.head(&arena), None);
        assert_eq!(list.tail(&arena), None);
    }

    #[test]
    fn iterate_forward_and_backward() {
        let mut arena: LinkArena<&str, 2> = LinkArena::new();
        let list = List::new(&mut arena, LINK1);
        for name in ["node3", "node2", "node1"] {
            let id = arena.insert(name);
            list.insert_head(&mut arena, id);
        }

        assert_eq!(values(&list, &arena), vec!["node1", "node2", "node3"]);
        let rev: Vec<_> = list.iter(&arena).rev().map(|(_, v)| *v).collect();
        assert_eq!(rev, vec!["node3", "node2", "node1"]);
        // restartable
        assert_eq!(list.iter(&arena).count(), 3);
    }

    #[test]
    fn insert_relative_to_anchor() {
        let mut arena: LinkArena<&str, 2> = LinkArena::new();
        let list = List::new(&mut arena, LINK1);
        let a = arena.insert("a");
        let b = arena.insert("b");
        let c = arena.insert("c");
        let d = arena.insert("d");

        list.insert_head(&mut arena, b);
        list.insert_before(&mut arena, a, Some(b));
        list.insert_after(&mut arena, c, Some(b));
        list.insert_after(&mut arena, d, None);
        assert_eq!(values(&list, &arena), vec!["a", "b", "c", "d"]);

        // moving an existing member
        list.insert_before(&mut arena, d, Some(a));
        assert_eq!(values(&list, &arena), vec!["d", "a", "b", "c"]);
        list.insert_before(&mut arena, d, None);
        assert_eq!(values(&list, &arena), vec!["a", "b", "c", "d"]);
        list.debug_validate_invariants(&arena);
    }

    #[test]
    fn one_object_in_two_lists() {
        let mut arena: LinkArena<&str, 2> = LinkArena::new();
        let by_age = List::new(&mut arena, LINK1);
        let by_name = List::new(&mut arena, LINK2);
        let a = arena.insert("a");
        let b = arena.insert("b");

        by_age.insert_tail(&mut arena, a);
        by_age.insert_tail(&mut arena, b);
        by_name.insert_tail(&mut arena, b);
        by_name.insert_tail(&mut arena, a);

        assert_eq!(values(&by_age, &arena), vec!["a", "b"]);
        assert_eq!(values(&by_name, &arena), vec!["b", "a"]);

        by_age.unlink(&mut arena, a);
        assert!(!by_age.contains(&arena, a));
        assert!(by_name.contains(&arena, a));
        arena.debug_validate_invariants();
    }

    #[test]
    fn reinserting_in_other_list_moves_member() {
        let mut arena: LinkArena<&str, 2> = LinkArena::new();
        let l1 = List::new(&mut arena, LINK1);
        let l2 = List::new(&mut arena, LINK1);
        let a = arena.insert("a");
        l1.insert_head(&mut arena, a);
        l2.insert_head(&mut arena, a);
        assert!(l1.is_empty(&arena));
        assert_eq!(l2.head(&arena), Some(a));
    }

    #[test]
    fn release_frees_sentinel() {
        let mut arena: LinkArena<&str, 2> = LinkArena::new();
        let list = List::new(&mut arena, LINK1);
        let a = arena.insert("a");
        list.insert_head(&mut arena, a);
        list.release(&mut arena);
        assert_eq!(arena.sentinel_count(), 0);
        assert!(!arena.is_linked(Node::slot(a, LINK1)));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn field_must_exist() {
        let mut arena: LinkArena<&str, 2> = LinkArena::new();
        let _ = List::new(&mut arena, 2);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Head(usize),
            Tail(usize),
            Unlink(usize),
            Destroy(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0..16usize).prop_map(Op::Head),
                (0..16usize).prop_map(Op::Tail),
                (0..16usize).prop_map(Op::Unlink),
                (0..16usize).prop_map(Op::Destroy),
            ]
        }

        proptest! {
            /// Property: the list always matches a VecDeque model
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_deque_model(ops in prop::collection::vec(op(), 0..200)) {
                let mut arena: LinkArena<usize, 1> = LinkArena::new();
                let list = List::new(&mut arena, 0);
                let mut ids: Vec<Option<SlotId>> = (0..16).map(|i| Some(arena.insert(i))).collect();
                let mut model: std::collections::VecDeque<usize> = Default::default();

                for op in ops {
                    match op {
                        Op::Head(i) => if let Some(id) = ids[i] {
                            list.insert_head(&mut arena, id);
                            model.retain(|v| *v != i);
                            model.push_front(i);
                        },
                        Op::Tail(i) => if let Some(id) = ids[i] {
                            list.insert_tail(&mut arena, id);
                            model.retain(|v| *v != i);
                            model.push_back(i);
                        },
                        Op::Unlink(i) => if let Some(id) = ids[i] {
                            list.unlink(&mut arena, id);
                            model.retain(|v| *v != i);
                        },
                        Op::Destroy(i) => if let Some(id) = ids[i].take() {
                            arena.destroy(id);
                            model.retain(|v| *v != i);
                        },
                    }

                    let actual: Vec<usize> = list.iter(&arena).map(|(_, v)| *v).collect();
                    let expected: Vec<usize> = model.iter().copied().collect();
                    prop_assert_eq!(actual, expected);
                    prop_assert_eq!(list.is_empty(&arena), model.is_empty());
                }
                list.debug_validate_invariants(&arena);
                arena.debug_validate_invariants();
            }
        }
    }
}
