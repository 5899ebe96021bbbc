//! This crate exposes an occurrence index: a Binary Search Tree (BST) that remembers every
//! position each key was seen at, e.g. the line numbers of every word in a file.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the key that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). The tree in [`index`] never rebalances, so its
//! height depends entirely on insertion order and can be as bad as `N` for sorted input. BSTs
//! also naturally support sorted iteration by visiting the left subtree, then the subtree root,
//! then the right subtree, which is what [`report`] uses to print every key in order.
//!
//! ## Occurrences
//!
//! Inserting a key that is already present never adds a node. The new marker is appended to the
//! existing node's list instead, so each key keeps its markers in the order they were recorded.
//!
//! ```
//! use key_index::{OrderedKeyIndex, Report};
//!
//! let text = "the cat\nsat on\nthe mat";
//! let index: OrderedKeyIndex<&str> = text
//!     .lines()
//!     .enumerate()
//!     .flat_map(|(line, words)| words.split_whitespace().map(move |w| (w, line + 1)))
//!     .collect();
//!
//! assert_eq!(index.search(&"the"), &[1, 3]);
//! assert_eq!(index.find_min(), Ok(&"cat"));
//! assert!(Report::new(&index).to_string().starts_with("cat "));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod index;
pub mod report;

#[cfg(test)]
mod test;

pub use error::EmptyTreeError;
pub use index::{InOrder, Marker, OrderedKeyIndex};
pub use report::{OccurrenceList, Report, ReportConfig};
