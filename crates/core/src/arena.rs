//! Node Arena - fixed-capacity slot storage with mark-and-sweep reclamation
//!
//! Nodes live in a `Vec` of slots addressed by [`NodeId`] handles. Free
//! slots are threaded into an intrusive free list; the arena never grows
//! past the capacity it was created with.
//!
//! Design:
//! - Allocation pops the free list, or extends the slot vector while it is
//!   still below capacity
//! - `collect` marks everything reachable from the caller's roots (through
//!   `next` links and nested list payloads) and sweeps the rest back onto
//!   the free list
//! - The arena knows nothing about interpreter state; the runtime decides
//!   what the roots are and when to collect
//!
//! Strings and file handles are reference counted, so sweeping a slot drops
//! its payload and releases them.

use crate::value::{Node, NodeId, NodeRef};

/// Default arena size, in nodes.
pub const MEMORYMAX: usize = 20000;

enum Slot {
    Free { next_free: Option<NodeId> },
    Used(Node),
}

/// Allocation and collection counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Successful allocations since creation
    pub allocations: u64,
    /// Completed collections
    pub collections: u64,
    /// Slots returned to the free list across all collections
    pub reclaimed: u64,
    /// Highest number of simultaneously live nodes observed
    pub peak_live: usize,
}

/// Fixed-capacity node store.
pub struct Arena {
    slots: Vec<Slot>,
    free: Option<NodeId>,
    capacity: usize,
    live: usize,
    stats: ArenaStats,
}

impl Arena {
    pub fn new(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity.min(MEMORYMAX)),
            free: None,
            capacity,
            live: 0,
            stats: ArenaStats::default(),
        }
    }

    /// Maximum number of nodes this arena can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of nodes currently in use.
    pub fn live(&self) -> usize {
        self.live
    }

    pub fn stats(&self) -> ArenaStats {
        self.stats
    }

    /// True when the next allocation would need a collection first.
    pub fn is_full(&self) -> bool {
        self.free.is_none() && self.slots.len() >= self.capacity
    }

    /// Store a node, or hand it back when no slot is available.
    pub fn try_insert(&mut self, node: Node) -> Result<NodeId, Node> {
        let id = if let Some(id) = self.free {
            match self.slots[id.index()] {
                Slot::Free { next_free } => self.free = next_free,
                Slot::Used(_) => unreachable!("arena: free list points at a live slot"),
            }
            self.slots[id.index()] = Slot::Used(node);
            id
        } else if self.slots.len() < self.capacity {
            let id = NodeId::from_index(self.slots.len());
            self.slots.push(Slot::Used(node));
            id
        } else {
            return Err(node);
        };
        self.live += 1;
        self.stats.allocations += 1;
        self.stats.peak_live = self.stats.peak_live.max(self.live);
        Ok(id)
    }

    /// Borrow a live node.
    ///
    /// # Panics
    /// Panics if `id` refers to a reclaimed slot. Handles held by the
    /// interpreter are always rooted, so this indicates a rooting bug.
    pub fn get(&self, id: NodeId) -> &Node {
        match &self.slots[id.index()] {
            Slot::Used(node) => node,
            Slot::Free { .. } => panic!("arena: dangling handle to slot {}", id.index()),
        }
    }

    /// Whether `id` currently names a live node.
    pub fn is_live(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.index()), Some(Slot::Used(_)))
    }

    /// Walk a list from `head`, yielding each node handle in order.
    pub fn iter(&self, head: NodeRef) -> ListIter<'_> {
        ListIter {
            arena: self,
            cursor: head,
        }
    }

    /// Number of nodes in the list starting at `head`.
    pub fn len_of(&self, head: NodeRef) -> usize {
        self.iter(head).count()
    }

    /// Mark from `roots` then sweep. Returns the number of reclaimed slots.
    pub fn collect<I>(&mut self, roots: I) -> usize
    where
        I: IntoIterator<Item = NodeRef>,
    {
        let marks = self.mark(roots);
        let reclaimed = self.sweep(&marks);
        self.stats.collections += 1;
        self.stats.reclaimed += reclaimed as u64;
        reclaimed
    }

    fn mark<I>(&self, roots: I) -> Vec<bool>
    where
        I: IntoIterator<Item = NodeRef>,
    {
        let mut marks = vec![false; self.slots.len()];
        let mut pending: Vec<NodeId> = roots.into_iter().flatten().collect();
        while let Some(id) = pending.pop() {
            let mut cursor = Some(id);
            // Follow `next` iteratively; only nested lists go on the work stack.
            while let Some(id) = cursor {
                if marks[id.index()] {
                    break;
                }
                marks[id.index()] = true;
                let node = self.get(id);
                if let Some(child) = node.payload.child() {
                    pending.push(child);
                }
                cursor = node.next;
            }
        }
        marks
    }

    fn sweep(&mut self, marks: &[bool]) -> usize {
        let mut reclaimed = 0;
        for (index, marked) in marks.iter().enumerate() {
            if *marked {
                continue;
            }
            if let Slot::Used(_) = self.slots[index] {
                self.slots[index] = Slot::Free {
                    next_free: self.free,
                };
                self.free = Some(NodeId::from_index(index));
                self.live -= 1;
                reclaimed += 1;
            }
        }
        reclaimed
    }
}

/// Iterator over the nodes of one list.
pub struct ListIter<'a> {
    arena: &'a Arena,
    cursor: NodeRef,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.arena.get(id);
        self.cursor = node.next;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Payload;

    fn push(arena: &mut Arena, n: i64, next: NodeRef) -> NodeId {
        arena
            .try_insert(Node::new(Payload::Int(n), next))
            .unwrap_or_else(|_| panic!("arena full"))
    }

    #[test]
    fn test_insert_until_full() {
        let mut arena = Arena::new(3);
        let a = push(&mut arena, 1, None);
        let b = push(&mut arena, 2, Some(a));
        let _c = push(&mut arena, 3, Some(b));
        assert!(arena.is_full());
        assert!(arena.try_insert(Node::new(Payload::Int(4), None)).is_err());
        assert_eq!(arena.live(), 3);
    }

    #[test]
    fn test_collect_keeps_reachable_chain() {
        let mut arena = Arena::new(8);
        let a = push(&mut arena, 1, None);
        let b = push(&mut arena, 2, Some(a));
        let garbage = push(&mut arena, 99, None);
        let reclaimed = arena.collect([Some(b)]);
        assert_eq!(reclaimed, 1);
        assert!(arena.is_live(a));
        assert!(arena.is_live(b));
        assert!(!arena.is_live(garbage));
        assert_eq!(arena.len_of(Some(b)), 2);
    }

    #[test]
    fn test_collect_follows_nested_lists() {
        let mut arena = Arena::new(8);
        let inner = push(&mut arena, 7, None);
        let holder = arena
            .try_insert(Node::new(Payload::List(Some(inner)), None))
            .unwrap_or_else(|_| panic!("arena full"));
        arena.collect([Some(holder)]);
        assert!(arena.is_live(inner));
    }

    #[test]
    fn test_reclaimed_slots_are_reused() {
        let mut arena = Arena::new(2);
        let a = push(&mut arena, 1, None);
        let _b = push(&mut arena, 2, None);
        assert!(arena.is_full());
        arena.collect([Some(a)]);
        assert!(!arena.is_full());
        let c = push(&mut arena, 3, None);
        assert_eq!(arena.live(), 2);
        assert!(arena.is_live(c));
        assert_eq!(arena.stats().collections, 1);
        assert_eq!(arena.stats().reclaimed, 1);
    }

    #[test]
    fn test_shared_suffix_marked_once() {
        let mut arena = Arena::new(8);
        let tail = push(&mut arena, 0, None);
        let left = push(&mut arena, 1, Some(tail));
        let right = push(&mut arena, 2, Some(tail));
        let reclaimed = arena.collect([Some(left), Some(right)]);
        assert_eq!(reclaimed, 0);
        assert_eq!(arena.live(), 3);
    }
}
