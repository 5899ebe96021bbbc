//! Errors surfaced by [`OrderedKeyIndex`][crate::index::OrderedKeyIndex].

/// Returned by [`find_min`][crate::index::OrderedKeyIndex::find_min] and
/// [`find_max`][crate::index::OrderedKeyIndex::find_max] when the index has no nodes.
///
/// Looking up, searching for, or removing a missing key is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot take the minimum or maximum of an empty tree")]
pub struct EmptyTreeError;
