// =====================================================================
// File: index/node.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 7, 2025
//
// Description:
//   Defines the B+ tree node structures used by the dictionary index.
//   Nodes live in an arena owned by the tree and refer to each other
//   through `NodeId` handles:
//
//   - `LeafNode`    : Sorted keys paired with values, plus a link to
//                     the next leaf in key order.
//   - `InternalNode`: Sorted separator keys and `keys.len() + 1` child
//                     handles. Holds no values.
//   - `Node`        : Either of the two.
//
// Notes:
//   * Split helpers reserve every buffer they need before moving any
//     entries, so a failed allocation leaves the node untouched.
//   * Higher-level operations (descent, insert, propagation) live in
//     `tree.rs`.
// =====================================================================

use std::collections::TryReserveError;
use std::fmt;


/// Handle to a node inside the tree's arena.
///
/// Node identity is the handle, never the node contents: two siblings
/// can hold identical keys right after a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}


// B+ Tree Referencing:
// https://build-your-own.org/database/
// https://www.geeksforgeeks.org/dsa/introduction-of-b-tree-2/
/// Leaf node: holds the actual dictionary entries.
#[derive(Debug, Default)]
pub struct LeafNode {
    pub keys: Vec<String>,
    /// `values[i]` belongs to `keys[i]`
    pub values: Vec<String>,
    /// Next leaf in ascending key order (not an owner).
    pub next: Option<NodeId>,
}


impl LeafNode {
    /// Creates an empty, unlinked leaf.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binary search helper over the leaf keys.
    ///
    /// Returns `Ok(pos)` when the key is stored at `pos`, or `Err(pos)`
    /// with the position where it would be inserted.
    ///
    /// # Example
    /// ```
    /// use dictree::index::LeafNode;
    ///
    /// let mut leaf = LeafNode::new();
    /// leaf.keys = vec!["cat".into(), "dog".into()];
    /// leaf.values = vec!["meow".into(), "bark".into()];
    ///
    /// assert_eq!(leaf.search("dog"), Ok(1));
    /// assert_eq!(leaf.search("ant"), Err(0));
    /// assert_eq!(leaf.search("emu"), Err(2));
    /// ```
    pub fn search(&self, key: &str) -> Result<usize, usize> {
        self.keys.binary_search_by(|k| k.as_str().cmp(key))
    }

    /// Inserts an entry at `pos`, growing both columns fallibly first.
    pub(crate) fn try_insert(
        &mut self,
        pos: usize,
        key: String,
        value: String,
    ) -> Result<(), TryReserveError> {
        self.keys.try_reserve(1)?;
        self.values.try_reserve(1)?;
        self.keys.insert(pos, key);
        self.values.insert(pos, value);
        Ok(())
    }

    /// Moves entries `[mid..]` into a new right sibling.
    ///
    /// The sibling inherits this leaf's successor link; the caller is
    /// responsible for pointing `self.next` at the sibling once it has a
    /// handle.
    pub(crate) fn split(&mut self, mid: usize) -> Result<LeafNode, TryReserveError> {
        debug_assert!(mid > 0 && mid < self.keys.len());
        let upper = self.keys.len() - mid;

        let mut keys = Vec::new();
        keys.try_reserve_exact(upper)?;
        let mut values = Vec::new();
        values.try_reserve_exact(upper)?;

        keys.extend(self.keys.drain(mid..));
        values.extend(self.values.drain(mid..));

        Ok(LeafNode {
            keys,
            values,
            next: self.next,
        })
    }
}


/// Internal node: routing only.
///
/// Child `i` holds keys below `keys[i]`; child `i + 1` holds keys
/// greater than or equal to `keys[i]`.
#[derive(Debug, Default)]
pub struct InternalNode {
    pub keys: Vec<String>,
    pub children: Vec<NodeId>,
}


impl InternalNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the child to descend into for `key`.
    ///
    /// Counts the separators that are `<= key`, so a key equal to a
    /// separator routes to the right-hand child.
    ///
    /// # Example
    /// ```
    /// use dictree::index::InternalNode;
    ///
    /// let mut node = InternalNode::new();
    /// node.keys = vec!["f".into(), "m".into()];
    ///
    /// assert_eq!(node.child_index("a"), 0);
    /// assert_eq!(node.child_index("f"), 1);
    /// assert_eq!(node.child_index("g"), 1);
    /// assert_eq!(node.child_index("z"), 2);
    /// ```
    pub fn child_index(&self, key: &str) -> usize {
        self.keys.partition_point(|sep| sep.as_str() <= key)
    }

    /// Makes room for one more separator/child pair.
    pub(crate) fn reserve_slot(&mut self) -> Result<(), TryReserveError> {
        self.keys.try_reserve(1)?;
        self.children.try_reserve(1)
    }

    /// Links `right` as the sibling after `children[idx]`, separated by
    /// `separator`.
    pub(crate) fn insert_child(&mut self, idx: usize, separator: String, right: NodeId) {
        self.keys.insert(idx, separator);
        self.children.insert(idx + 1, right);
    }

    /// Splits around `keys[mid]`, which is removed and returned as the
    /// separator for the parent. The new sibling takes keys `[mid + 1..]`
    /// and children `[mid + 1..]`.
    pub(crate) fn split(&mut self, mid: usize) -> Result<(String, InternalNode), TryReserveError> {
        debug_assert!(mid > 0 && mid + 1 < self.keys.len());

        let mut keys = Vec::new();
        keys.try_reserve_exact(self.keys.len() - mid - 1)?;
        let mut children = Vec::new();
        children.try_reserve_exact(self.children.len() - mid - 1)?;

        keys.extend(self.keys.drain(mid + 1..));
        children.extend(self.children.drain(mid + 1..));
        // keys[mid] is now the last key
        let separator = self.keys.swap_remove(mid);

        Ok((separator, InternalNode { keys, children }))
    }
}


/// A node in the arena.
#[derive(Debug)]
pub enum Node {
    Leaf(LeafNode),
    Internal(InternalNode),
}


impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn keys(&self) -> &[String] {
        match self {
            Node::Leaf(leaf) => &leaf.keys,
            Node::Internal(inner) => &inner.keys,
        }
    }

    /// Number of keys held by the node.
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    pub fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Internal(_) => None,
        }
    }

    pub fn as_internal(&self) -> Option<&InternalNode> {
        match self {
            Node::Internal(inner) => Some(inner),
            Node::Leaf(_) => None,
        }
    }

    pub(crate) fn as_leaf_mut(&mut self) -> Option<&mut LeafNode> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Internal(_) => None,
        }
    }

    pub(crate) fn as_internal_mut(&mut self) -> Option<&mut InternalNode> {
        match self {
            Node::Internal(inner) => Some(inner),
            Node::Leaf(_) => None,
        }
    }
}
