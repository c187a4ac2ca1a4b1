//! # bintree-map
//!
//! A mutable ordered map built on an unbalanced binary search tree, ordered
//! by a comparator chosen at construction time.
//!
//! ## Overview
//!
//! - **[`Map`]**: the abstract ordered-map contract, including structural
//!   equality, order-independent hashing and a removing iterator
//! - **[`BinaryTreeMap`]**: the binary search tree implementation
//! - **[`comparator`]**: key orderings shared between maps by reference
//!
//! ## Feature Flags
//!
//! - `tracing`: emit `tracing` events for clears, rejected merges and
//!   two-child removals (enabled by default)
//!
//! ## Example
//!
//! ```rust
//! use bintree_map::prelude::*;
//!
//! let order: SharedComparator<i32> = comparator::shared(IntegerOrder);
//! let mut map = BinaryTreeMap::new(order);
//! map.put(20, "twenty");
//! map.put(10, "ten");
//! map.put(30, "thirty");
//!
//! let mut cursor = map.iterator();
//! while let Some(entry) = cursor.next() {
//!     if *entry.key() == 20 {
//!         cursor.remove();
//!     }
//! }
//!
//! assert_eq!(format!("{map}"), "{10: ten, 30: thirty}");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the map types, the map contract and the comparators.
///
/// # Usage
///
/// ```rust
/// use bintree_map::prelude::*;
/// ```
pub mod prelude {
    pub use crate::comparator::{
        self, Comparator, FloatOrder, IntegerOrder, NaturalOrder, ReverseOrder, SharedComparator,
        StringOrder,
    };
    pub use crate::map::{Entry, Map, MapError, MapIterator};
    pub use crate::BinaryTreeMap;
}

pub mod comparator;
pub mod map;

mod binary_tree;
mod log;

pub use binary_tree::{
    BinaryTreeMap, BinaryTreeMapCursor, BinaryTreeMapIntoIterator, BinaryTreeMapIterator, Keys,
    Values,
};
pub use map::{Entry, Map, MapError, MapIterator};
