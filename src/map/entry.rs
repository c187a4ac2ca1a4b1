use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash, Hasher};

/// An owned key-value pair detached from its map.
///
/// Entries are produced by [`MapIterator`](super::MapIterator)
/// implementations. The key is fixed; the value can be replaced with
/// [`Entry::set_value`], but the change stays local to the entry until it is
/// written back with [`Map::put`](super::Map::put).
///
/// # Examples
///
/// ```rust
/// use bintree_map::Entry;
///
/// let mut entry = Entry::new("answer", 41);
/// let previous = entry.set_value(42);
///
/// assert_eq!(previous, 41);
/// assert_eq!(entry.key(), &"answer");
/// assert_eq!(entry.value(), &42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry from a key and a value.
    #[inline]
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key.
    #[inline]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value.
    #[inline]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Replaces the value, returning the previous one.
    #[inline]
    pub const fn set_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    /// Splits the entry into its key and value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Hashes an entry as `hash(key) ^ hash(value)`.
///
/// Uses a fixed-key hasher so the result only depends on the entry itself,
/// which lets map hashes be combined independently of iteration order.
pub(crate) fn entry_hash<K: Hash + ?Sized, V: Hash + ?Sized>(key: &K, value: &V) -> u64 {
    let build_hasher = BuildHasherDefault::<DefaultHasher>::default();
    build_hasher.hash_one(key) ^ build_hasher.hash_one(value)
}

impl<K: Hash, V: Hash> Hash for Entry<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(entry_hash(&self.key, &self.value));
    }
}
