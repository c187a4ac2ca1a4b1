//! Mutable ordered map based on an unbalanced binary search tree.
//!
//! This module provides [`BinaryTreeMap`], an ordered map whose key order
//! comes from an injected [`Comparator`] instead of an `Ord` bound.
//!
//! # Overview
//!
//! The tree is a plain binary search tree without rebalancing:
//!
//! - O(h) get, put and remove, where h is the height of the tree
//! - h is O(log N) for random insertion order and O(N) for sorted input
//! - O(1) len and `is_empty`
//!
//! # Examples
//!
//! ```rust
//! use bintree_map::BinaryTreeMap;
//! use bintree_map::comparator::StringOrder;
//!
//! let mut map = BinaryTreeMap::with_comparator(StringOrder);
//! map.put("bb".to_string(), 2);
//! map.put("ab".to_string(), 1);
//! map.put("cd".to_string(), 3);
//!
//! let keys: Vec<&String> = map.keys().collect();
//! assert_eq!(keys, vec!["ab", "bb", "cd"]);
//!
//! assert_eq!(map.remove(&"bb".to_string()), Some(2));
//! assert_eq!(map.len(), 2);
//! ```
//!
//! # Internal Structure
//!
//! Nodes are stored in an arena and linked by index. Every lookup, insertion
//! and removal goes through a single descent, `locate_parent`,
//! which reports the link that holds (or would hold) the key: either the root
//! link or one side of a parent node. Treating the root link like any other
//! link removes the special case for operations that hit the root.
//!
//! A node with two children is removed by moving its in-order predecessor's
//! entry into it and unlinking the predecessor. The removing cursor depends
//! on this; see the `iterator` module documentation.

mod iterator;
mod node;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::comparator::{self, Comparator, NaturalOrder, SharedComparator};
use crate::map::{Map, MapError};

use iterator::InorderStack;
use node::{NodeArena, NodeIndex};

pub use iterator::{
    BinaryTreeMapCursor, BinaryTreeMapIntoIterator, BinaryTreeMapIterator, Keys, Values,
};

// =============================================================================
// Navigation Types
// =============================================================================

/// A slot that can hold a node: the root link, or one child slot of a
/// parent node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Link {
    Root,
    Left(NodeIndex),
    Right(NodeIndex),
}

/// Outcome of descending towards a key.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Search {
    /// `node` holds the key and hangs from `link`.
    Found { link: Link, node: NodeIndex },
    /// The key is absent; a node for it belongs in `link`.
    Vacant { link: Link },
}

// =============================================================================
// BinaryTreeMap Definition
// =============================================================================

/// An ordered map backed by an unbalanced binary search tree.
///
/// Keys are ordered by a [`SharedComparator`] supplied at construction. Two
/// maps built with the same shared comparator instance can be merged with
/// [`BinaryTreeMap::put_all`].
///
/// # Time Complexity
///
/// | Operation      | Complexity        |
/// |----------------|-------------------|
/// | `new`          | O(1)              |
/// | `get`          | O(h)              |
/// | `put`          | O(h)              |
/// | `remove`       | O(h)              |
/// | `contains_key` | O(h)              |
/// | `min`/`max`    | O(h)              |
/// | `len`          | O(1)              |
/// | `is_empty`     | O(1)              |
///
/// # Examples
///
/// ```rust
/// use bintree_map::BinaryTreeMap;
///
/// let mut map = BinaryTreeMap::natural();
/// assert_eq!(map.put(3, "three"), None);
/// assert_eq!(map.put(1, "one"), None);
/// assert_eq!(map.put(3, "THREE"), Some("three"));
///
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&1, &3]);
/// ```
#[derive(Clone)]
pub struct BinaryTreeMap<K, V> {
    /// Storage for every node of the tree
    nodes: NodeArena<K, V>,
    /// Root node, if the map is not empty
    root: Option<NodeIndex>,
    /// Number of entries
    length: usize,
    /// Key order
    comparator: SharedComparator<K>,
}

static_assertions::assert_not_impl_any!(BinaryTreeMap<i32, i32>: Send, Sync);

impl<K, V> BinaryTreeMap<K, V> {
    /// Creates an empty map ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree_map::BinaryTreeMap;
    /// use bintree_map::comparator::{self, IntegerOrder, SharedComparator};
    ///
    /// let order: SharedComparator<i32> = comparator::shared(IntegerOrder);
    /// let first: BinaryTreeMap<i32, &str> = BinaryTreeMap::new(order.clone());
    /// let second: BinaryTreeMap<i32, &str> = BinaryTreeMap::new(order);
    /// assert!(std::rc::Rc::ptr_eq(first.comparator(), second.comparator()));
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(comparator: SharedComparator<K>) -> Self {
        Self {
            nodes: NodeArena::new(),
            root: None,
            length: 0,
            comparator,
        }
    }

    /// Creates an empty map ordered by `comparator`, with room for
    /// `capacity` entries before the node storage reallocates.
    #[must_use]
    pub fn with_capacity(comparator: SharedComparator<K>, capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            root: None,
            length: 0,
            comparator,
        }
    }

    /// Creates an empty map ordered by a fresh shared copy of `comparator`.
    #[must_use]
    pub fn with_comparator<C>(comparator: C) -> Self
    where
        C: Comparator<K> + 'static,
    {
        Self::new(comparator::shared(comparator))
    }

    /// Creates an empty map ordered by the keys' [`Ord`] implementation.
    #[must_use]
    pub fn natural() -> Self
    where
        K: Ord,
    {
        Self::with_comparator(NaturalOrder)
    }

    /// Returns the number of entries in the map.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the comparator that orders this map's keys.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &SharedComparator<K> {
        &self.comparator
    }

    fn compare(&self, first: &K, second: &K) -> Ordering {
        self.comparator.compare(first, second)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Descends from the root towards `key`.
    ///
    /// The returned link is [`Link::Root`] when the key sits in the root or
    /// when the tree is empty.
    fn locate_parent(&self, key: &K) -> Search {
        let mut link = Link::Root;
        let mut current = self.root;
        while let Some(node) = current {
            let candidate = &self.nodes[node];
            match self.compare(key, &candidate.key) {
                Ordering::Equal => return Search::Found { link, node },
                Ordering::Less => {
                    link = Link::Left(node);
                    current = candidate.left;
                }
                Ordering::Greater => {
                    link = Link::Right(node);
                    current = candidate.right;
                }
            }
        }
        Search::Vacant { link }
    }

    fn locate_node(&self, key: &K) -> Option<NodeIndex> {
        match self.locate_parent(key) {
            Search::Found { node, .. } => Some(node),
            Search::Vacant { .. } => None,
        }
    }

    fn link_target(&self, link: Link) -> Option<NodeIndex> {
        match link {
            Link::Root => self.root,
            Link::Left(parent) => self.nodes[parent].left,
            Link::Right(parent) => self.nodes[parent].right,
        }
    }

    fn set_link(&mut self, link: Link, target: Option<NodeIndex>) {
        match link {
            Link::Root => self.root = target,
            Link::Left(parent) => self.nodes[parent].left = target,
            Link::Right(parent) => self.nodes[parent].right = target,
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree_map::BinaryTreeMap;
    ///
    /// let mut map = BinaryTreeMap::natural();
    /// map.put("hello".to_string(), 42);
    ///
    /// assert_eq!(map.get(&"hello".to_string()), Some(&42));
    /// assert_eq!(map.get(&"world".to_string()), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.locate_node(key).map(|node| &self.nodes[node].value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node = self.locate_node(key)?;
        Some(&mut self.nodes[node].value)
    }

    /// Returns `true` if the map contains a value for the specified key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate_node(key).is_some()
    }

    /// Returns `true` if some entry's value compares equal to `value` under
    /// `value_comparator`.
    ///
    /// This is a linear scan in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree_map::BinaryTreeMap;
    /// use bintree_map::comparator::StringOrder;
    ///
    /// let mut map = BinaryTreeMap::natural();
    /// map.put(1, "one");
    ///
    /// assert!(map.contains_value(&"one", &StringOrder));
    /// assert!(!map.contains_value(&"two", &StringOrder));
    /// ```
    #[must_use]
    pub fn contains_value<C>(&self, value: &V, value_comparator: &C) -> bool
    where
        C: Comparator<V> + ?Sized,
    {
        self.values()
            .any(|candidate| value_comparator.compare(value, candidate) == Ordering::Equal)
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = &self.nodes[self.root?];
        while let Some(left) = node.left {
            node = &self.nodes[left];
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = &self.nodes[self.root?];
        while let Some(right) = node.right {
            node = &self.nodes[right];
        }
        Some((&node.key, &node.value))
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// The tree is never rebalanced, so inserting keys in sorted order
    /// produces a height equal to the number of entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree_map::BinaryTreeMap;
    ///
    /// let mut map = BinaryTreeMap::natural();
    /// for key in 0..5 {
    ///     map.put(key, ());
    /// }
    /// assert_eq!(map.height(), 5);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(NodeIndex, usize)> =
            self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((index, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[index];
            pending.extend(node.left.map(|left| (left, depth + 1)));
            pending.extend(node.right.map(|right| (right, depth + 1)));
        }
        deepest
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contains the key, the value is replaced in place
    /// and the previous value is returned. The stored key is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree_map::BinaryTreeMap;
    ///
    /// let mut map = BinaryTreeMap::natural();
    /// assert_eq!(map.put(1, "one"), None);
    /// assert_eq!(map.put(1, "ONE"), Some("one"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.locate_parent(&key) {
            Search::Found { node, .. } => {
                debug_assert_eq!(
                    self.compare(&key, &self.nodes[node].key),
                    Ordering::Equal,
                    "located node does not hold the key"
                );
                Some(std::mem::replace(&mut self.nodes[node].value, value))
            }
            Search::Vacant { link } => {
                debug_assert!(
                    self.link_target(link).is_none(),
                    "attachment point is already occupied"
                );
                debug_assert!(
                    match link {
                        Link::Root => true,
                        Link::Left(parent) | Link::Right(parent) =>
                            self.compare(&key, &self.nodes[parent].key) != Ordering::Equal,
                    },
                    "duplicate key in the tree"
                );
                let node = self.nodes.allocate(key, value);
                self.set_link(link, Some(node));
                self.length += 1;
                None
            }
        }
    }

    /// Copies every entry of `other` into this map.
    ///
    /// Values of keys present in both maps are replaced by `other`'s values.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::IncompatibleComparator`] if `other` is not ordered
    /// by the same comparator instance. The map is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree_map::BinaryTreeMap;
    /// use bintree_map::comparator::{self, IntegerOrder, SharedComparator};
    ///
    /// let order: SharedComparator<i32> = comparator::shared(IntegerOrder);
    /// let mut target = BinaryTreeMap::new(order.clone());
    /// target.put(5, "five");
    /// let mut source = BinaryTreeMap::new(order);
    /// source.put(5, "five,eh");
    /// source.put(1, "one,eh");
    ///
    /// target.put_all(&source).unwrap();
    /// assert_eq!(target.get(&5), Some(&"five,eh"));
    /// assert_eq!(target.len(), 2);
    ///
    /// let stranger = BinaryTreeMap::with_comparator(IntegerOrder);
    /// assert!(target.put_all(&stranger).is_err());
    /// ```
    pub fn put_all<M>(&mut self, other: &M) -> Result<(), MapError>
    where
        M: Map<K, V>,
        K: Clone,
        V: Clone,
    {
        <Self as Map<K, V>>::put_all(self, other)
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Removes a key from the map, returning its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree_map::BinaryTreeMap;
    ///
    /// let mut map = BinaryTreeMap::natural();
    /// map.put(1, "one");
    ///
    /// assert_eq!(map.remove(&1), Some("one"));
    /// assert_eq!(map.remove(&1), None);
    /// assert!(map.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and its value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        match self.locate_parent(key) {
            Search::Found { link, node } => Some(self.remove_located(link, node)),
            Search::Vacant { .. } => None,
        }
    }

    /// Removes the entry stored in `node` by looking its key up again.
    fn remove_node(&mut self, node: NodeIndex) -> Option<(K, V)> {
        match self.locate_parent(&self.nodes[node].key) {
            Search::Found { link, node: found } => {
                debug_assert_eq!(found, node, "key of a linked node leads elsewhere");
                Some(self.remove_located(link, found))
            }
            Search::Vacant { .. } => None,
        }
    }

    /// Removes `node`, which hangs from `link`. This is the only place the
    /// entry count goes down.
    fn remove_located(&mut self, link: Link, node: NodeIndex) -> (K, V) {
        let entry = self.unlink(link, node);
        self.length -= 1;
        if self.root.is_none() {
            self.nodes.clear();
        }
        debug_assert_eq!(self.nodes.live(), self.length, "entry count drifted");
        entry
    }

    /// Takes the entry of `node` out of the tree without touching the count.
    ///
    /// A node with at most one child is released and its child takes its
    /// place. A node with two children stays linked: its in-order
    /// predecessor is unlinked instead and moves its entry into `node`.
    fn unlink(&mut self, link: Link, node: NodeIndex) -> (K, V) {
        debug_assert_eq!(
            self.link_target(link),
            Some(node),
            "link does not lead to the node being removed"
        );
        let (left, right) = (self.nodes[node].left, self.nodes[node].right);
        match (left, right) {
            (Some(left), Some(_)) => {
                let (predecessor_link, predecessor) = self.predecessor(node, left);
                crate::log::log_trace!("promoting in-order predecessor into a two-child node");
                // The predecessor has no right child, so this recursion ends
                // in one of the other arms.
                let (key, value) = self.unlink(predecessor_link, predecessor);
                let target = &mut self.nodes[node];
                (
                    std::mem::replace(&mut target.key, key),
                    std::mem::replace(&mut target.value, value),
                )
            }
            (child, None) | (None, child) => {
                self.set_link(link, child);
                let released = self.nodes.release(node);
                (released.key, released.value)
            }
        }
    }

    /// Finds the right-most node of `node`'s left subtree and the link that
    /// holds it.
    fn predecessor(&self, node: NodeIndex, left: NodeIndex) -> (Link, NodeIndex) {
        let mut link = Link::Left(node);
        let mut current = left;
        while let Some(right) = self.nodes[current].right {
            link = Link::Right(current);
            current = right;
        }
        (link, current)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        crate::log::log_debug!(entries = self.length, "clearing binary tree map");
        self.nodes.clear();
        self.root = None;
        self.length = 0;
    }

    /// Retains only the entries for which `keep` returns `true`, visiting
    /// entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree_map::BinaryTreeMap;
    ///
    /// let mut map = BinaryTreeMap::natural();
    /// for key in 1..=6 {
    ///     map.put(key, key * 10);
    /// }
    /// map.retain(|key, value| {
    ///     *value += 1;
    ///     key % 3 != 0
    /// });
    ///
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![11, 21, 41, 51]);
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut pending = InorderStack::new(&self.nodes, self.root);
        while let Some(index) = pending.pop(&self.nodes) {
            let node = &mut self.nodes[index];
            if !keep(&node.key, &mut node.value) {
                self.remove_node(index);
            }
        }
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Returns an iterator over entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree_map::BinaryTreeMap;
    ///
    /// let mut map = BinaryTreeMap::natural();
    /// map.put(3, "three");
    /// map.put(1, "one");
    /// map.put(2, "two");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    /// ```
    #[must_use]
    pub fn iter(&self) -> BinaryTreeMapIterator<'_, K, V> {
        BinaryTreeMapIterator::new(self)
    }

    /// Returns an iterator over keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over values in ascending key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Returns a cursor that walks the entries in ascending key order and
    /// can remove the entry it produced last.
    pub fn iterator(&mut self) -> BinaryTreeMapCursor<'_, K, V> {
        BinaryTreeMapCursor::new(self)
    }
}

// =============================================================================
// Map Contract
// =============================================================================

impl<K: Clone, V: Clone> Map<K, V> for BinaryTreeMap<K, V> {
    type Cursor<'a>
        = BinaryTreeMapCursor<'a, K, V>
    where
        Self: 'a;

    type Entries<'a>
        = BinaryTreeMapIterator<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn contains_key(&self, key: &K) -> bool {
        Self::contains_key(self, key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    fn is_empty(&self) -> bool {
        Self::is_empty(self)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        Self::put(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        Self::remove(self, key)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn comparator(&self) -> &SharedComparator<K> {
        Self::comparator(self)
    }

    fn iterator(&mut self) -> Self::Cursor<'_> {
        Self::iterator(self)
    }

    fn entries<'a>(&'a self) -> Self::Entries<'a>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Extend<(K, V)> for BinaryTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> IntoIterator for BinaryTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = BinaryTreeMapIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        BinaryTreeMapIntoIterator::new(self)
    }
}

impl<'a, K, V> IntoIterator for &'a BinaryTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = BinaryTreeMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two maps are equal when they have the same size and every key of one is
/// present in the other. Values are not compared; see [`Map::map_eq`].
impl<K: Clone, V: Clone> PartialEq for BinaryTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.map_eq(other)
    }
}

/// Hashes the order-independent sum of the entry hashes; see
/// [`Map::map_hash`].
impl<K: Clone + Hash, V: Clone + Hash> Hash for BinaryTreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.map_hash());
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BinaryTreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for BinaryTreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================
