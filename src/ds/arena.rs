//! Arena of payloads that each carry `N` embedded link fields.
//!
//! This is the storage half of the intrusive containers: a [`List`],
//! [`Dictionary`] or [`HashSet`] never owns its members, it only threads one
//! link field of slots that live here. A slot can therefore be a member of
//! up to `N` containers at once (one per field) without extra allocation.
//!
//! ## Architecture
//!
//! ```text
//!   slots (SlotArena<Slot<T, N>>)               sentinels (SlotArena<Link>)
//!   ┌────────┬──────────────────────────────┐   ┌──────────┬──────────────┐
//!   │ SlotId │ value │ links[0] │ links[1] │   │ Sentinel │ next / prev  │
//!   ├────────┼───────┼──────────┼──────────┤   ├──────────┼──────────────┤
//!   │ id_0   │   A   │ list     │ bucket 3 │   │ s_0      │ list head    │
//!   │ id_1   │   B   │ list     │ (self)   │   │ s_1..s_n │ dict buckets │
//!   └────────┴───────┴──────────┴──────────┘   └──────────┴──────────────┘
//! ```
//!
//! ## Removal contract
//!
//! [`LinkArena::destroy`] is the only way a slot leaves the arena. It unlinks
//! every embedded field before freeing the slot, so no chain is ever left
//! pointing at a dead slot.
//!
//! [`List`]: crate::ds::list::List
//! [`Dictionary`]: crate::ds::dictionary::Dictionary
//! [`HashSet`]: crate::ds::hashset::HashSet

use crate::ds::link::{Link, Node, SentinelId};
use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Slot<T, const N: usize> {
    value: T,
    links: [Link; N],
}

/// Owner of every payload and sentinel used by the intrusive containers.
#[derive(Debug)]
pub struct LinkArena<T, const N: usize> {
    slots: SlotArena<Slot<T, N>>,
    sentinels: SlotArena<Link>,
}

impl<T, const N: usize> LinkArena<T, N> {
    /// Number of link fields carried by every slot.
    pub const FIELDS: usize = N;

    pub fn new() -> Self {
        Self {
            slots: SlotArena::new(),
            sentinels: SlotArena::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: SlotArena::with_capacity(capacity),
            sentinels: SlotArena::new(),
        }
    }

    /// Stores `value` with every link field unlinked.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.slots.insert_with(|id| Slot {
            value,
            links: std::array::from_fn(|field| Link::detached(Node::slot(id, field))),
        })
    }

    /// Unlinks every field of `id` and removes it, returning the payload.
    pub fn destroy(&mut self, id: SlotId) -> Option<T> {
        if !self.slots.contains(id) {
            return None;
        }
        for field in 0..N {
            self.unlink(Node::slot(id, field));
        }
        self.slots.remove(id).map(|slot| slot.value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id).map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id).map(|slot| &mut slot.value)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.slots.contains(id)
    }

    /// Number of live payload slots (sentinels excluded).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of live sentinels.
    pub fn sentinel_count(&self) -> usize {
        self.sentinels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().map(|(id, slot)| (id, &slot.value))
    }

    /// Destroys every payload and leaves all sentinels empty.
    pub fn clear(&mut self) {
        self.slots.clear();
        for (id, link) in self.sentinels.iter_mut() {
            *link = Link::detached(Node::Sentinel(SentinelId(id.index())));
        }
    }

    /// Allocates an empty sentinel for a new chain.
    pub fn alloc_sentinel(&mut self) -> SentinelId {
        let id = self
            .sentinels
            .insert_with(|id| Link::detached(Node::Sentinel(SentinelId(id.index()))));
        SentinelId(id.index())
    }

    /// Detaches every member of the sentinel's chain and frees the sentinel.
    pub fn free_sentinel(&mut self, sentinel: SentinelId) {
        let start = Node::Sentinel(sentinel);
        while let Some(next) = self.next_node(start) {
            self.unlink(next);
        }
        self.sentinels.remove(SlotId(sentinel.0));
    }

    /// Returns the link record at `node`.
    pub fn link(&self, node: Node) -> Option<&Link> {
        match node {
            Node::Slot { id, field } => self.slots.get(id)?.links.get(field),
            Node::Sentinel(sentinel) => self.sentinels.get(SlotId(sentinel.0)),
        }
    }

    pub(crate) fn link_mut(&mut self, node: Node) -> Option<&mut Link> {
        match node {
            Node::Slot { id, field } => self.slots.get_mut(id)?.links.get_mut(field),
            Node::Sentinel(sentinel) => self.sentinels.get_mut(SlotId(sentinel.0)),
        }
    }

    #[cfg(any(test, debug_assertions))]
    /// Asserts that every link's neighbours point back at it.
    pub fn debug_validate_invariants(&self) {
        let check = |node: Node, link: &Link| {
            let next = self.link(link.next).expect("next link missing");
            assert_eq!(next.prev, node, "next.prev mismatch at {node:?}");
            let prev = self.link(link.prev).expect("prev link missing");
            assert_eq!(prev.next, node, "prev.next mismatch at {node:?}");
        };
        for (id, slot) in self.slots.iter() {
            for (field, link) in slot.links.iter().enumerate() {
                check(Node::slot(id, field), link);
            }
        }
        for (id, link) in self.sentinels.iter() {
            check(Node::Sentinel(SentinelId(id.index())), link);
        }
    }
}

impl<T, const N: usize> Default for LinkArena<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
