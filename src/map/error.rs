//! Error types for map operations.

/// Represents errors returned by fallible map operations.
///
/// # Examples
///
/// ```rust
/// use bintree_map::MapError;
///
/// let error = MapError::IncompatibleComparator {
///     operation: "put_all",
/// };
/// assert_eq!(
///     format!("{error}"),
///     "put_all: maps are ordered by different comparators"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Two maps were combined although they do not share the same
    /// comparator instance. The receiving map is left unmodified.
    IncompatibleComparator {
        /// The name of the operation that was rejected.
        operation: &'static str,
    },
}

impl std::fmt::Display for MapError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncompatibleComparator { operation } => write!(
                formatter,
                "{operation}: maps are ordered by different comparators"
            ),
        }
    }
}

impl std::error::Error for MapError {}
