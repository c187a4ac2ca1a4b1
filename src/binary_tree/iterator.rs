//! In-order traversal of a [`BinaryTreeMap`].
//!
//! Every iterator here walks the tree with an explicit stack. The top of the
//! stack is always the smallest key not produced yet; popping a node pushes
//! its right child and that child's chain of left descendants.
//!
//! [`BinaryTreeMapCursor`] can remove the entry it produced last while the
//! walk continues. This relies on how [`BinaryTreeMap::remove`] treats a
//! node with two children: the node stays where it is and takes over its
//! in-order predecessor's entry, and the predecessor node is unlinked
//! instead. Everything still on the stack is strictly greater than the
//! removed key, while the predecessor is strictly smaller, so no stacked
//! node is ever moved or released by the removal. Switching removal to the
//! in-order successor would break this: the successor is the next node the
//! cursor has to produce.

use std::iter::FusedIterator;

use super::BinaryTreeMap;
use super::node::{NodeArena, NodeIndex};
use crate::map::{Entry, MapIterator};

// =============================================================================
// Traversal Stack
// =============================================================================

/// Nodes still to be produced, smallest on top.
#[derive(Clone, Debug, Default)]
pub(super) struct InorderStack {
    pending: Vec<NodeIndex>,
}

impl InorderStack {
    /// Starts a traversal of the subtree rooted at `start`.
    pub(super) fn new<K, V>(nodes: &NodeArena<K, V>, start: Option<NodeIndex>) -> Self {
        let mut stack = Self::default();
        stack.push_left_spine(nodes, start);
        stack
    }

    fn push_left_spine<K, V>(&mut self, nodes: &NodeArena<K, V>, start: Option<NodeIndex>) {
        let mut current = start;
        while let Some(index) = current {
            self.pending.push(index);
            current = nodes[index].left;
        }
    }

    /// Pops the next node in key order and schedules its right subtree.
    pub(super) fn pop<K, V>(&mut self, nodes: &NodeArena<K, V>) -> Option<NodeIndex> {
        let index = self.pending.pop()?;
        self.push_left_spine(nodes, nodes[index].right);
        Some(index)
    }

    pub(super) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

// =============================================================================
// Borrowing Iterators
// =============================================================================

/// An iterator over the entries of a [`BinaryTreeMap`] in ascending key order.
pub struct BinaryTreeMapIterator<'a, K, V> {
    nodes: &'a NodeArena<K, V>,
    pending: InorderStack,
    remaining: usize,
}

impl<'a, K, V> BinaryTreeMapIterator<'a, K, V> {
    pub(super) fn new(map: &'a BinaryTreeMap<K, V>) -> Self {
        Self {
            nodes: &map.nodes,
            pending: InorderStack::new(&map.nodes, map.root),
            remaining: map.length,
        }
    }
}

impl<'a, K, V> Iterator for BinaryTreeMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.pending.pop(self.nodes)?;
        self.remaining -= 1;
        let node = &self.nodes[index];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for BinaryTreeMapIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for BinaryTreeMapIterator<'_, K, V> {}

impl<K, V> Clone for BinaryTreeMapIterator<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            pending: self.pending.clone(),
            remaining: self.remaining,
        }
    }
}

/// An iterator over the keys of a [`BinaryTreeMap`] in ascending order.
pub struct Keys<'a, K, V> {
    inner: BinaryTreeMapIterator<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(super) const fn new(inner: BinaryTreeMapIterator<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// An iterator over the values of a [`BinaryTreeMap`] in ascending key order.
pub struct Values<'a, K, V> {
    inner: BinaryTreeMapIterator<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(super) const fn new(inner: BinaryTreeMapIterator<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

// =============================================================================
// Owning Iterator
// =============================================================================

/// An owning iterator over the entries of a [`BinaryTreeMap`] in ascending
/// key order.
pub struct BinaryTreeMapIntoIterator<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> BinaryTreeMapIntoIterator<K, V> {
    pub(super) fn new(map: BinaryTreeMap<K, V>) -> Self {
        let BinaryTreeMap {
            mut nodes,
            root,
            length,
            ..
        } = map;
        let mut entries = Vec::with_capacity(length);
        let mut pending = InorderStack::new(&nodes, root);
        while let Some(index) = pending.pop(&nodes) {
            // The right subtree is already on the stack, so the node can go.
            let node = nodes.release(index);
            entries.push((node.key, node.value));
        }
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for BinaryTreeMapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for BinaryTreeMapIntoIterator<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for BinaryTreeMapIntoIterator<K, V> {}

impl<K, V> FusedIterator for BinaryTreeMapIntoIterator<K, V> {}

// =============================================================================
// Removing Cursor
// =============================================================================

/// An in-order iterator that can remove the entry it produced last.
///
/// Obtained from [`BinaryTreeMap::iterator`]. The cursor borrows the map
/// exclusively, so the only structural change possible while it is alive is
/// [`BinaryTreeMapCursor::remove`].
///
/// # Examples
///
/// ```rust
/// use bintree_map::BinaryTreeMap;
///
/// let mut map = BinaryTreeMap::natural();
/// for key in [4, 2, 6, 1, 3, 5, 7] {
///     map.put(key, key * 10);
/// }
///
/// let mut cursor = map.iterator();
/// let mut seen = Vec::new();
/// while let Some(entry) = cursor.next() {
///     seen.push(*entry.key());
///     if entry.key() % 2 == 0 {
///         cursor.remove();
///     }
/// }
///
/// assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7]);
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5, 7]);
/// ```
pub struct BinaryTreeMapCursor<'a, K, V> {
    map: &'a mut BinaryTreeMap<K, V>,
    pending: InorderStack,
    current: Option<NodeIndex>,
}

impl<'a, K, V> BinaryTreeMapCursor<'a, K, V> {
    pub(super) fn new(map: &'a mut BinaryTreeMap<K, V>) -> Self {
        let pending = InorderStack::new(&map.nodes, map.root);
        Self {
            map,
            pending,
            current: None,
        }
    }

    /// Returns `true` if another call to `next` will produce an entry.
    pub fn has_next(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Removes the entry produced by the last call to `next` and returns its
    /// value.
    ///
    /// Returns `None` before the first `next` and on a second `remove`
    /// without an intervening `next`.
    pub fn remove(&mut self) -> Option<V> {
        let index = self.current.take()?;
        self.map.remove_node(index).map(|(_, value)| value)
    }

    /// Returns a reference to the value of the entry produced last.
    pub fn current_value(&self) -> Option<&V> {
        self.current.map(|index| &self.map.nodes[index].value)
    }

    /// Returns a mutable reference to the value of the entry produced last,
    /// writing through to the map.
    pub fn current_value_mut(&mut self) -> Option<&mut V> {
        self.current.map(|index| &mut self.map.nodes[index].value)
    }
}

impl<K: Clone, V: Clone> Iterator for BinaryTreeMapCursor<'_, K, V> {
    type Item = Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(index) = self.pending.pop(&self.map.nodes) else {
            self.current = None;
            return None;
        };
        self.current = Some(index);
        let node = &self.map.nodes[index];
        Some(Entry::new(node.key.clone(), node.value.clone()))
    }
}

impl<K: Clone, V: Clone> FusedIterator for BinaryTreeMapCursor<'_, K, V> {}

impl<K: Clone, V: Clone> MapIterator<K, V> for BinaryTreeMapCursor<'_, K, V> {
    fn has_next(&self) -> bool {
        Self::has_next(self)
    }

    fn remove(&mut self) -> Option<V> {
        Self::remove(self)
    }
}
