//! The abstract map contract.
//!
//! [`Map`] describes an ordered associative container whose ordering is an
//! injected [`Comparator`](crate::comparator::Comparator) rather than a trait
//! bound on the key type. [`MapIterator`] is the removing iterator every map
//! hands out through [`Map::iterator`].
//!
//! # Examples
//!
//! ```rust
//! use bintree_map::{BinaryTreeMap, Map, MapIterator};
//! use bintree_map::comparator::{self, IntegerOrder, SharedComparator};
//!
//! let order: SharedComparator<i32> = comparator::shared(IntegerOrder);
//! let mut evens = BinaryTreeMap::new(order.clone());
//! let mut odds = BinaryTreeMap::new(order);
//! evens.put(2, "two");
//! odds.put(1, "one");
//!
//! // Same comparator instance, so the maps can be merged.
//! evens.put_all(&odds).unwrap();
//! assert_eq!(evens.len(), 2);
//!
//! let mut cursor = evens.iterator();
//! while let Some(entry) = cursor.next() {
//!     if *entry.key() == 1 {
//!         cursor.remove();
//!     }
//! }
//! assert!(!evens.contains_key(&1));
//! ```

mod entry;
mod error;

use std::rc::Rc;

use crate::comparator::SharedComparator;

pub use entry::Entry;
pub(crate) use entry::entry_hash;
pub use error::MapError;

/// An iterator over a map that can remove the entry it produced last.
///
/// Entries come out in ascending key order as owned [`Entry`] values.
pub trait MapIterator<K, V>: Iterator<Item = Entry<K, V>> {
    /// Returns `true` if another call to `next` will produce an entry.
    fn has_next(&self) -> bool;

    /// Removes the entry returned by the most recent call to `next` from the
    /// underlying map and returns its value.
    ///
    /// Returns `None` if `next` has not been called yet or the entry has
    /// already been removed.
    fn remove(&mut self) -> Option<V>;
}

/// An ordered map whose key order is defined by a shared comparator.
pub trait Map<K, V> {
    /// The removing iterator returned by [`Map::iterator`].
    type Cursor<'a>: MapIterator<K, V>
    where
        Self: 'a;

    /// The read-only iterator returned by [`Map::entries`].
    type Entries<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Removes every entry.
    fn clear(&mut self);

    /// Returns `true` if the map holds an entry for `key`.
    fn contains_key(&self, key: &K) -> bool;

    /// Returns the value stored for `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns `true` if the map holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `value` under `key`, returning the value it replaced.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Copies every entry of `other` into this map, replacing the values of
    /// keys present in both.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::IncompatibleComparator`] if `other` is not ordered
    /// by the same comparator instance as `self`. Nothing is copied in that
    /// case.
    fn put_all<M>(&mut self, other: &M) -> Result<(), MapError>
    where
        M: Map<K, V>,
        K: Clone,
        V: Clone,
    {
        if !Rc::ptr_eq(self.comparator(), other.comparator()) {
            crate::log::log_debug!(
                receiver = self.len(),
                incoming = other.len(),
                "rejecting put_all across different comparators"
            );
            return Err(MapError::IncompatibleComparator {
                operation: "put_all",
            });
        }
        for (key, value) in other.entries() {
            self.put(key.clone(), value.clone());
        }
        Ok(())
    }

    /// Removes the entry for `key`, returning its value.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns the comparator that orders this map's keys.
    fn comparator(&self) -> &SharedComparator<K>;

    /// Returns a removing iterator positioned before the smallest key.
    fn iterator(&mut self) -> Self::Cursor<'_>;

    /// Returns the entries in ascending key order.
    fn entries<'a>(&'a self) -> Self::Entries<'a>
    where
        K: 'a,
        V: 'a;

    /// Structural comparison with another map.
    ///
    /// Two maps are equal when they have the same size and every key of
    /// `other` is present in `self`. Values are not compared.
    fn map_eq<M: Map<K, V>>(&self, other: &M) -> bool {
        self.len() == other.len() && other.entries().all(|(key, _)| self.contains_key(key))
    }

    /// Order-independent hash of all entries.
    ///
    /// Each entry hashes as `hash(key) ^ hash(value)`; the entry hashes are
    /// summed with wrapping arithmetic.
    fn map_hash(&self) -> u64
    where
        K: std::hash::Hash,
        V: std::hash::Hash,
    {
        self.entries().fold(0_u64, |total, (key, value)| {
            total.wrapping_add(entry_hash(key, value))
        })
    }
}
