//! Key ordering functions.
//!
//! A [`BinaryTreeMap`](crate::BinaryTreeMap) does not require `K: Ord`.
//! Instead it is handed a [`Comparator`] at construction time and uses it
//! for every key comparison for the rest of its life.
//!
//! Comparators are shared by reference through [`SharedComparator`]. Two
//! maps are considered to use "the same ordering" only when they hold the
//! *same* shared comparator (pointer identity), which is what
//! [`Map::put_all`](crate::Map::put_all) checks before merging.
//!
//! # Examples
//!
//! ```rust
//! use bintree_map::comparator::{self, Comparator, IntegerOrder, ReverseOrder, SharedComparator};
//! use std::cmp::Ordering;
//!
//! assert_eq!(IntegerOrder.compare(&1_i32, &2), Ordering::Less);
//! assert_eq!(ReverseOrder(IntegerOrder).compare(&1_i32, &2), Ordering::Greater);
//!
//! // Any closure with the right shape is a comparator too.
//! let by_length = |first: &String, second: &String| first.len().cmp(&second.len());
//! let shared: SharedComparator<String> = comparator::shared(by_length);
//! assert_eq!(
//!     shared.compare(&"aaa".to_string(), &"b".to_string()),
//!     Ordering::Greater
//! );
//! ```

use std::cmp::Ordering;
use std::rc::Rc;

/// A total order over values of type `T`.
///
/// Implementations must be consistent: for the lifetime of a map the same
/// pair of keys must always compare the same way, and the relation must be
/// a total order (antisymmetric, transitive, total).
pub trait Comparator<T: ?Sized> {
    /// Compares `first` with `second`.
    fn compare(&self, first: &T, second: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, first: &T, second: &T) -> Ordering {
        self(first, second)
    }
}

/// A reference-counted, type-erased comparator.
///
/// Cloning the handle shares the comparator; maps built from clones of the
/// same handle accept each other in `put_all`.
pub type SharedComparator<T> = Rc<dyn Comparator<T>>;

/// Wraps a comparator into a fresh [`SharedComparator`].
///
/// Every call produces a distinct identity, even for stateless comparators.
pub fn shared<T, C>(comparator: C) -> SharedComparator<T>
where
    T: ?Sized,
    C: Comparator<T> + 'static,
{
    Rc::new(comparator)
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, first: &T, second: &T) -> Ordering {
        first.cmp(second)
    }
}

/// Lexicographic order over anything that views as a string slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringOrder;

impl<T: AsRef<str> + ?Sized> Comparator<T> for StringOrder {
    #[inline]
    fn compare(&self, first: &T, second: &T) -> Ordering {
        first.as_ref().cmp(second.as_ref())
    }
}

/// Numeric order over the primitive integer types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerOrder;

macro_rules! impl_integer_order {
    ($($integer:ty),* $(,)?) => {
        $(
            impl Comparator<$integer> for IntegerOrder {
                #[inline]
                fn compare(&self, first: &$integer, second: &$integer) -> Ordering {
                    first.cmp(second)
                }
            }
        )*
    };
}

impl_integer_order!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Order over `f32` / `f64` following the IEEE 754 `totalOrder` predicate.
///
/// Negative zero sorts before positive zero and NaNs sort at the ends, so
/// every float (NaN included) has exactly one place in the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatOrder;

impl Comparator<f64> for FloatOrder {
    #[inline]
    fn compare(&self, first: &f64, second: &f64) -> Ordering {
        first.total_cmp(second)
    }
}

impl Comparator<f32> for FloatOrder {
    #[inline]
    fn compare(&self, first: &f32, second: &f32) -> Ordering {
        first.total_cmp(second)
    }
}

/// Reverses the order of the wrapped comparator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReverseOrder<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for ReverseOrder<C> {
    #[inline]
    fn compare(&self, first: &T, second: &T) -> Ordering {
        self.0.compare(second, first)
    }
}
