//! Node storage for [`BinaryTreeMap`](super::BinaryTreeMap).
//!
//! Nodes live in an arena and link to each other by index. An index stays
//! bound to the same node until that node is released, which is what lets
//! iterators keep a stack of pending nodes across a removal.

use std::ops::{Index, IndexMut};

/// Position of a node inside its [`NodeArena`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) struct NodeIndex(usize);

/// A tree node: one entry plus links to at most two children.
#[derive(Clone, Debug)]
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) left: Option<NodeIndex>,
    pub(super) right: Option<NodeIndex>,
}

impl<K, V> Node<K, V> {
    /// Creates a node with no children.
    const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

/// Owns every node of one tree.
///
/// Released slots are remembered and handed out again by later
/// allocations.
#[derive(Clone, Debug)]
pub(super) struct NodeArena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    vacant: Vec<NodeIndex>,
}

impl<K, V> NodeArena<K, V> {
    pub(super) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
        }
    }

    /// Stores a new leaf and returns its index.
    pub(super) fn allocate(&mut self, key: K, value: V) -> NodeIndex {
        let node = Node::leaf(key, value);
        if let Some(index) = self.vacant.pop() {
            debug_assert!(self.slots[index.0].is_none(), "vacant slot is occupied");
            self.slots[index.0] = Some(node);
            index
        } else {
            self.slots.push(Some(node));
            NodeIndex(self.slots.len() - 1)
        }
    }

    /// Takes a node out of the arena. The caller must already have unlinked
    /// it from the tree.
    pub(super) fn release(&mut self, index: NodeIndex) -> Node<K, V> {
        match self.slots[index.0].take() {
            Some(node) => {
                self.vacant.push(index);
                node
            }
            None => unreachable!("node {index:?} released twice"),
        }
    }

    /// Drops every node.
    pub(super) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
    }

    /// Number of nodes currently stored.
    pub(super) fn live(&self) -> usize {
        self.slots.len() - self.vacant.len()
    }
}

impl<K, V> Index<NodeIndex> for NodeArena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        match &self.slots[index.0] {
            Some(node) => node,
            None => unreachable!("link to released node {index:?}"),
        }
    }
}

impl<K, V> IndexMut<NodeIndex> for NodeArena<K, V> {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        match &mut self.slots[index.0] {
            Some(node) => node,
            None => unreachable!("link to released node {index:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_allocate_returns_distinct_indices() {
        let mut arena = NodeArena::new();
        let first = arena.allocate(1, "one");
        let second = arena.allocate(2, "two");

        assert_ne!(first, second);
        assert_eq!(arena[first].key, 1);
        assert_eq!(arena[second].value, "two");
        assert_eq!(arena.live(), 2);
    }

    #[rstest]
    fn test_released_slot_is_reused() {
        let mut arena = NodeArena::with_capacity(4);
        let first = arena.allocate(1, "one");
        let _second = arena.allocate(2, "two");

        let released = arena.release(first);
        assert_eq!(released.key, 1);
        assert_eq!(arena.live(), 1);

        let third = arena.allocate(3, "three");
        assert_eq!(third, first);
        assert_eq!(arena[third].key, 3);
        assert_eq!(arena.live(), 2);
    }

    #[rstest]
    fn test_new_nodes_are_leaves() {
        let mut arena = NodeArena::new();
        let index = arena.allocate("key", 0);
        assert!(arena[index].left.is_none());
        assert!(arena[index].right.is_none());
    }

    #[rstest]
    fn test_clear_drops_everything() {
        let mut arena = NodeArena::new();
        let index = arena.allocate(1, 1);
        arena.release(index);
        arena.allocate(2, 2);
        arena.clear();

        assert_eq!(arena.live(), 0);
        assert_eq!(arena.allocate(3, 3), NodeIndex(0));
    }

    #[rstest]
    #[should_panic(expected = "released twice")]
    fn test_double_release_panics() {
        let mut arena = NodeArena::new();
        let index = arena.allocate(1, 1);
        arena.release(index);
        arena.release(index);
    }
}
