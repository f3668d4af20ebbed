//! Link records and the splice operations that thread them into chains.
//!
//! A [`Link`] is a `next`/`prev` pair stored inside a [`LinkArena`] slot
//! (one per link field) or inside a sentinel record. Every chain is
//! circular: a lone link points at itself, which is both the "unlinked"
//! state of a member link and the "empty" state of a sentinel.
//!
//! ```text
//!   sentinel ──► slot 4 / field 0 ──► slot 1 / field 0 ──┐
//!       ▲                                                │
//!       └────────────────────────────────────────────────┘
//! ```
//!
//! Links are addressed by [`Node`], so any node can be unlinked knowing only
//! its own address; the container it belongs to is never consulted.

use crate::ds::arena::LinkArena;
use crate::ds::slot_arena::SlotId;

/// Handle to a sentinel record owned by a [`LinkArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SentinelId(pub(crate) usize);

impl SentinelId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Address of one link record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    /// Link field `field` embedded in slot `id`.
    Slot { id: SlotId, field: usize },
    /// Non-payload boundary of a chain.
    Sentinel(SentinelId),
}

impl Node {
    #[inline]
    pub fn slot(id: SlotId, field: usize) -> Self {
        Node::Slot { id, field }
    }

    /// Returns the owning slot, or `None` for a sentinel.
    #[inline]
    pub fn owner(self) -> Option<SlotId> {
        match self {
            Node::Slot { id, .. } => Some(id),
            Node::Sentinel(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub(crate) next: Node,
    pub(crate) prev: Node,
}

impl Link {
    /// The self-referencing rest state for the link living at `me`.
    #[inline]
    pub(crate) fn detached(me: Node) -> Self {
        Self { next: me, prev: me }
    }

    #[inline]
    pub fn next(&self) -> Node {
        self.next
    }

    #[inline]
    pub fn prev(&self) -> Node {
        self.prev
    }
}

impl<T, const N: usize> LinkArena<T, N> {
    /// Returns `true` if `node` exists and is part of a chain other than itself.
    pub fn is_linked(&self, node: Node) -> bool {
        self.link(node).is_some_and(|link| link.next != node)
    }

    /// Removes `node` from its chain and resets it to the rest state.
    ///
    /// Idempotent; returns `true` only if the node was linked.
    pub fn unlink(&mut self, node: Node) -> bool {
        if !self.is_linked(node) {
            return false;
        }
        self.remove_from_chain(node);
        if let Some(link) = self.link_mut(node) {
            *link = Link::detached(node);
        }
        true
    }

    /// Splices `node` directly after `anchor`, first unlinking it from any
    /// chain it is currently in.
    ///
    /// Returns `false` (and does nothing) if either node does not exist or
    /// both addresses are the same link.
    pub fn insert_after(&mut self, anchor: Node, node: Node) -> bool {
        if anchor == node || self.link(anchor).is_none() || self.link(node).is_none() {
            return false;
        }
        self.unlink(node);
        let Some(after) = self.link(anchor).map(|link| link.next) else {
            return false;
        };
        self.set_links(node, after, anchor);
        self.set_prev(after, node);
        self.set_next(anchor, node);
        true
    }

    /// Splices `node` directly before `anchor`, first unlinking it from any
    /// chain it is currently in.
    pub fn insert_before(&mut self, anchor: Node, node: Node) -> bool {
        if anchor == node || self.link(anchor).is_none() || self.link(node).is_none() {
            return false;
        }
        self.unlink(node);
        let Some(before) = self.link(anchor).map(|link| link.prev) else {
            return false;
        };
        self.set_links(node, anchor, before);
        self.set_next(before, node);
        self.set_prev(anchor, node);
        true
    }

    /// Returns the node following `node`, or `None` if `node` is unlinked.
    pub fn next_node(&self, node: Node) -> Option<Node> {
        let link = self.link(node)?;
        (link.next != node).then_some(link.next)
    }

    /// Returns the node preceding `node`, or `None` if `node` is unlinked.
    pub fn prev_node(&self, node: Node) -> Option<Node> {
        let link = self.link(node)?;
        (link.prev != node).then_some(link.prev)
    }

    /// Returns the slot owning the link after `node`; `None` at a sentinel.
    pub fn next_slot(&self, node: Node) -> Option<SlotId> {
        self.next_node(node).and_then(Node::owner)
    }

    /// Returns the slot owning the link before `node`; `None` at a sentinel.
    pub fn prev_slot(&self, node: Node) -> Option<SlotId> {
        self.prev_node(node).and_then(Node::owner)
    }

    /// Iterates the slots chained to `sentinel`, front to back.
    pub fn chain(&self, sentinel: SentinelId) -> Chain<'_, T, N> {
        let start = Node::Sentinel(sentinel);
        let (front, back) = match self.link(start) {
            Some(link) => (link.next, link.prev),
            None => (start, start),
        };
        Chain {
            arena: self,
            front,
            back,
            done: front == start,
        }
    }

    fn remove_from_chain(&mut self, node: Node) {
        let Some(Link { next, prev }) = self.link(node).copied() else {
            return;
        };
        self.set_prev(next, prev);
        self.set_next(prev, next);
    }

    #[inline]
    fn set_links(&mut self, node: Node, next: Node, prev: Node) {
        if let Some(link) = self.link_mut(node) {
            link.next = next;
            link.prev = prev;
        }
    }

    #[inline]
    fn set_next(&mut self, node: Node, next: Node) {
        if let Some(link) = self.link_mut(node) {
            link.next = next;
        }
    }

    #[inline]
    fn set_prev(&mut self, node: Node, prev: Node) {
        if let Some(link) = self.link_mut(node) {
            link.prev = prev;
        }
    }
}

/// Double-ended iterator over the slots of one chain.
///
/// Borrows the arena immutably, so the chain cannot change underneath it.
#[derive(Debug)]
pub struct Chain<'a, T, const N: usize> {
    arena: &'a LinkArena<T, N>,
    front: Node,
    back: Node,
    done: bool,
}

impl<T, const N: usize> Iterator for Chain<'_, T, N> {
    type Item = SlotId;

    fn next(&mut self) -> Option<SlotId> {
        if self.done {
            return None;
        }
        let current = self.front;
        if current == self.back {
            self.done = true;
        } else {
            match self.arena.link(current) {
                Some(link) => self.front = link.next,
                None => self.done = true,
            }
        }
        current.owner()
    }
}

impl<T, const N: usize> DoubleEndedIterator for Chain<'_, T, N> {
    fn next_back(&mut self) -> Option<SlotId> {
        if self.done {
            return None;
        }
        let current = self.back;
        if current == self.front {
            self.done = true;
        } else {
            match self.arena.link(current) {
                Some(link) => self.back = link.prev,
                None => self.done = true,
            }
        }
        current.owner()
    }
}
