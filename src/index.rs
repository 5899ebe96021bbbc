//! An unbalanced BST that indexes where each key was seen. Every distinct key owns one node and
//! that node collects the occurrence markers (e.g. line numbers) recorded for the key, in the
//! order they were inserted.
//!
//! The shape of the tree is fully determined by insertion order, so sorted input produces a
//! chain. All walks are loops or explicit stacks so a chain of any length is fine.
//!
//! # Examples
//!
//! ```
//! use key_index::index::OrderedKeyIndex;
//!
//! let mut index = OrderedKeyIndex::new();
//!
//! // Nothing in here yet.
//! assert!(!index.contains(&"apple"));
//! assert!(index.search(&"apple").is_empty());
//!
//! index.insert("apple", 3);
//! index.insert("pear", 5);
//!
//! // Seeing a key again appends to its occurrences instead of adding a node.
//! index.insert("apple", 7);
//! assert_eq!(index.search(&"apple"), &[3, 7]);
//! assert_eq!(index.size(), 2);
//!
//! // Removing a key hands back its occurrences.
//! assert_eq!(index.remove(&"apple"), Some(vec![3, 7]));
//! assert!(!index.contains(&"apple"));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::error::EmptyTreeError;

/// An occurrence marker, e.g. the line number a key was found on.
pub type Marker = usize;

type Link<K> = Option<Box<Node<K>>>;

/// A Binary Search Tree mapping each key to the markers recorded for it. This can be used for
/// inserting, searching, and removing keys. It does not rebalance itself.
pub struct OrderedKeyIndex<K> {
    root: Link<K>,
}

impl<K> Default for OrderedKeyIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for OrderedKeyIndex<K> {
    fn drop(&mut self) {
        self.make_empty();
    }
}

impl<K> Clone for OrderedKeyIndex<K>
where
    K: Clone,
{
    /// Deep copies every node. The copy shares nothing with `self`.
    fn clone(&self) -> Self {
        enum Step<'a, K> {
            Visit(Option<&'a Node<K>>),
            Build(&'a Node<K>),
        }

        // Post-order: both copied children are on `built` (left below right) by the time their
        // parent is built.
        let mut work = vec![Step::Visit(self.root.as_deref())];
        let mut built: Vec<Link<K>> = Vec::new();
        while let Some(step) = work.pop() {
            match step {
                Step::Visit(None) => built.push(None),
                Step::Visit(Some(node)) => {
                    work.push(Step::Build(node));
                    work.push(Step::Visit(node.right.as_deref()));
                    work.push(Step::Visit(node.left.as_deref()));
                }
                Step::Build(node) => {
                    let right = built.pop().flatten();
                    let left = built.pop().flatten();
                    built.push(Some(Box::new(Node {
                        key: node.key.clone(),
                        occurrences: node.occurrences.clone(),
                        left,
                        right,
                    })));
                }
            }
        }

        Self {
            root: built.pop().flatten(),
        }
    }
}

impl<K> fmt::Debug for OrderedKeyIndex<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two indexes are equal when they hold the same keys with the same occurrences. Their shapes
/// may differ.
impl<K> PartialEq for OrderedKeyIndex<K>
where
    K: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K> Eq for OrderedKeyIndex<K> where K: Eq {}

impl<K> FromIterator<(K, Marker)> for OrderedKeyIndex<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, Marker)>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<K> Extend<(K, Marker)> for OrderedKeyIndex<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, Marker)>>(&mut self, iter: I) {
        for (key, marker) in iter {
            self.insert(key, marker);
        }
    }
}

impl<'a, K> IntoIterator for &'a OrderedKeyIndex<K> {
    type Item = (&'a K, &'a [Marker]);
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> OrderedKeyIndex<K> {
    /// Generate a new, empty `OrderedKeyIndex`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Returns `true` if the index holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Records `marker` as an occurrence of `key`. A key seen for the first time gets a new
    /// node; a key seen before has `marker` appended to its occurrences.
    ///
    /// # Examples
    ///
    /// ```
    /// use key_index::index::OrderedKeyIndex;
    ///
    /// let mut index = OrderedKeyIndex::new();
    ///
    /// index.insert("b", 1);
    /// index.insert("a", 2);
    /// index.insert("b", 4);
    ///
    /// assert_eq!(index.search(&"b"), &[1, 4]);
    /// assert_eq!(index.size(), 2);
    /// ```
    pub fn insert(&mut self, key: K, marker: Marker)
    where
        K: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => {
                    node.occurrences.push(marker);
                    return;
                }
                Ordering::Greater => &mut node.right,
            };
        }

        log::trace!("new key with first occurrence {}", marker);
        *link = Some(Node::new_boxed(key, marker));
    }

    /// Removes the node holding `key` and returns the occurrences it had. If the index does not
    /// contain `key`, nothing happens and `None` is returned.
    ///
    /// A node with two children is not unlinked. Instead it takes over the key and occurrences of
    /// its in-order successor, whose original node is removed from the right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use key_index::index::OrderedKeyIndex;
    ///
    /// let mut index = OrderedKeyIndex::new();
    /// index.insert(1, 10);
    /// index.insert(1, 20);
    ///
    /// assert_eq!(index.remove(&1), Some(vec![10, 20]));
    /// assert_eq!(index.remove(&1), None);
    /// assert!(index.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<Vec<Marker>>
    where
        K: Ord,
    {
        let link = Self::link_to(&mut self.root, key)?;

        let node = link.as_mut().expect("`link_to` returns an occupied link");
        if node.left.is_some() && node.right.is_some() {
            let successor =
                Node::take_min(&mut node.right).expect("a non-empty right subtree has a minimum");
            let Node {
                key, occurrences, ..
            } = *successor;
            node.key = key;
            log::trace!("promoted successor into a node with two children");
            return Some(std::mem::replace(&mut node.occurrences, occurrences));
        }

        let removed = link.take().expect("`link_to` returns an occupied link");
        let Node {
            occurrences,
            left,
            right,
            ..
        } = *removed;
        // At most one of these is a node.
        *link = left.or(right);
        log::trace!("unlinked node with {} occurrences", occurrences.len());
        Some(occurrences)
    }

    /// Returns `true` if `key` has been inserted and not removed since.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find_node(key).is_some()
    }

    /// Returns the occurrences recorded for `key` in insertion order. The slice is empty if the
    /// index does not contain `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use key_index::index::OrderedKeyIndex;
    ///
    /// let index: OrderedKeyIndex<_> = [("x", 3), ("x", 7), ("y", 12)].into_iter().collect();
    ///
    /// assert_eq!(index.search(&"x"), &[3, 7]);
    /// assert!(index.search(&"z").is_empty());
    /// ```
    pub fn search(&self, key: &K) -> &[Marker]
    where
        K: Ord,
    {
        self.find_node(key)
            .map(|node| node.occurrences.as_slice())
            .unwrap_or_default()
    }

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// [`EmptyTreeError`] if the index is empty.
    pub fn find_min(&self) -> Result<&K, EmptyTreeError> {
        let mut node = self.root.as_deref().ok_or(EmptyTreeError)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.key)
    }

    /// Returns the largest key.
    ///
    /// # Errors
    ///
    /// [`EmptyTreeError`] if the index is empty.
    pub fn find_max(&self) -> Result<&K, EmptyTreeError> {
        let mut node = self.root.as_deref().ok_or(EmptyTreeError)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.key)
    }

    /// The number of nodes on the longest path from the root to a leaf. An empty index has a
    /// height of 0. This walks the whole tree.
    pub fn height(&self) -> usize {
        Node::subtree_height(self.root.as_deref())
    }

    /// The number of distinct keys. This walks the whole tree.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Iterates over the keys in ascending order along with their occurrences. The iterator only
    /// borrows the index so a new one can be started at any time.
    ///
    /// # Examples
    ///
    /// ```
    /// use key_index::index::OrderedKeyIndex;
    ///
    /// let index: OrderedKeyIndex<_> = [(2, 20), (1, 10), (2, 21)].into_iter().collect();
    /// let entries: Vec<_> = index.iter().collect();
    ///
    /// assert_eq!(entries, vec![(&1, &[10][..]), (&2, &[20, 21][..])]);
    /// ```
    pub fn iter(&self) -> InOrder<'_, K> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Removes every key. Children are released before their parents.
    pub fn make_empty(&mut self) {
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        let mut released = 0usize;
        while let Some(mut node) = stack.pop() {
            let children = [node.left.take(), node.right.take()];
            if children.iter().any(Option::is_some) {
                stack.push(node);
                stack.extend(children.into_iter().flatten());
            } else {
                released += 1;
            }
        }

        if released > 0 {
            log::debug!("released {} nodes", released);
        }
    }

    /// Walks down from `link` to the link holding `key`. Returns `None` if no node has `key`.
    fn link_to<'a>(mut link: &'a mut Link<K>, key: &K) -> Option<&'a mut Link<K>>
    where
        K: Ord,
    {
        loop {
            // Compare through a shared borrow first so the `Equal` case hands back `link`
            // without a mutable borrow of it still outstanding.
            let ordering = key.cmp(&link.as_ref()?.key);
            link = match ordering {
                Ordering::Less => &mut link.as_mut()?.left,
                Ordering::Equal => return Some(link),
                Ordering::Greater => &mut link.as_mut()?.right,
            };
        }
    }

    fn find_node(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }
}

/// An in-order iterator over an [`OrderedKeyIndex`]. Created by [`OrderedKeyIndex::iter`].
pub struct InOrder<'a, K> {
    /// Nodes whose left subtrees have been pushed but which haven't been yielded yet.
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> InOrder<'a, K> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = (&'a K, &'a [Marker]);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some((&node.key, node.occurrences.as_slice()))
    }
}

impl<K> FusedIterator for InOrder<'_, K> {}

/// A key, everywhere it occurred, and the subtrees of smaller and larger keys.
struct Node<K> {
    key: K,
    /// Never empty.
    occurrences: Vec<Marker>,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn new_boxed(key: K, marker: Marker) -> Box<Self> {
        Box::new(Node {
            key,
            occurrences: vec![marker],
            left: None,
            right: None,
        })
    }

    fn children(&self) -> impl Iterator<Item = &Self> + '_ {
        self.left.as_deref().into_iter().chain(self.right.as_deref())
    }

    /// Counts levels breadth first.
    fn subtree_height(root: Option<&Self>) -> usize {
        let mut level: Vec<&Self> = root.into_iter().collect();
        let mut height = 0;
        while !level.is_empty() {
            height += 1;
            level = level.into_iter().flat_map(|n| n.children()).collect();
        }
        height
    }

    /// Unlinks the smallest node under `link`, putting its right child in its place.
    fn take_min(mut link: &mut Link<K>) -> Option<Box<Self>> {
        while link.as_ref()?.left.is_some() {
            link = &mut link.as_mut()?.left;
        }
        let mut min = link.take()?;
        *link = min.right.take();
        Some(min)
    }
}
