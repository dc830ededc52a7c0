// =====================================================================
// File: index/tree.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 7, 2025 - Refactored Oct. 12, 2025
//
// Description:
//   Implements the B+ tree index (`BPlusTreeIndex`) that maps words to
//   their meanings. The tree owns an arena of `Node`s and the handle of
//   the current root.
//
// Features:
//   - `insert`: Adds or overwrites an entry (last write wins), splitting
//               overflowing nodes all the way up to the root.
//   - `search`: Descends to the candidate leaf and binary searches it.
//   - `iter`  : Ordered walk over the leaf chain.
//   - `dump`  : Depth-first rendering of every node for debugging.
//
// Notes:
//   * A node overflows once it holds `order` keys.
//   * Insert records the (node, child index) pairs it passes on the way
//     down and pops them while splitting upward, so a parent is never
//     searched for.
// =====================================================================

use std::collections::TryReserveError;

use tracing::{debug, error, trace};

use super::node::{InternalNode, LeafNode, Node, NodeId};
use crate::config::Order;
use crate::error::{ConfigError, IndexError};

/// Internal nodes visited on the way to a leaf, with the child slot taken.
type Path = Vec<(NodeId, usize)>;


/// B+ tree index over string keys and values.
///
/// Contains the order, the node arena and the root handle.
#[derive(Debug)]
pub struct BPlusTreeIndex {
    order: Order,
    nodes: Vec<Node>,
    root: NodeId,
    len: usize,
    poisoned: bool,
}


impl Default for BPlusTreeIndex {
    fn default() -> Self {
        Self::new(Order::default())
    }
}


impl BPlusTreeIndex {
    /// Create an empty index: a single empty leaf as the root.
    pub fn new(order: Order) -> Self {
        Self {
            order,
            nodes: vec![Node::Leaf(LeafNode::new())],
            root: NodeId::new(0),
            len: 0,
            poisoned: false,
        }
    }

    /// Create an empty index, validating a raw order value.
    ///
    /// # Example
    /// ```
    /// use dictree::BPlusTreeIndex;
    /// assert!(BPlusTreeIndex::with_order(4).is_ok());
    /// assert!(BPlusTreeIndex::with_order(2).is_err());
    /// ```
    pub fn with_order(order: usize) -> Result<Self, ConfigError> {
        Ok(Self::new(Order::new(order)?))
    }

    /// Search for a key.
    ///
    /// # Returns
    /// * `Ok(&str)` with the stored value on a hit.
    /// * `Err(IndexError::NotFound)` when the key is absent.
    ///
    /// # Example
    /// ```
    /// use dictree::{BPlusTreeIndex, IndexError};
    ///
    /// let mut index = BPlusTreeIndex::with_order(4).unwrap();
    /// index.insert("dog".into(), "bark".into()).unwrap();
    ///
    /// assert_eq!(index.search("dog").unwrap(), "bark");
    /// assert!(matches!(index.search("cat"), Err(IndexError::NotFound(_))));
    /// ```
    pub fn search(&self, key: &str) -> Result<&str, IndexError> {
        self.get(key)
            .ok_or_else(|| IndexError::NotFound(key.to_string()))
    }

    /// Like [`search`](Self::search) but returns `None` on a miss.
    pub fn get(&self, key: &str) -> Option<&str> {
        let leaf = self.nodes[self.find_leaf(key).index()].as_leaf()?;
        let pos = leaf.search(key).ok()?;
        Some(leaf.values[pos].as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert a key-value pair.
    ///
    /// - If the key already exists its value is replaced (last write wins)
    ///   and the previous value is returned.
    /// - Otherwise the entry is placed in sorted position in its leaf and
    ///   any overflow is split upward, growing a new root if needed.
    ///
    /// # Errors
    /// * `AllocationFailure` if the tree cannot grow. When this happens
    ///   before the leaf is touched the index is unchanged; when it happens
    ///   while splitting, the index is poisoned.
    /// * `Poisoned` if an earlier insert was interrupted mid-split.
    ///
    /// # Example
    /// ```
    /// use dictree::BPlusTreeIndex;
    ///
    /// let mut index = BPlusTreeIndex::with_order(3).unwrap();
    /// assert_eq!(index.insert("dog".into(), "bark".into()).unwrap(), None);
    ///
    /// // Overwrite existing key
    /// let old = index.insert("dog".into(), "woof".into()).unwrap();
    /// assert_eq!(old.as_deref(), Some("bark"));
    /// assert_eq!(index.search("dog").unwrap(), "woof");
    /// ```
    pub fn insert(&mut self, key: String, value: String) -> Result<Option<String>, IndexError> {
        if self.poisoned {
            return Err(IndexError::Poisoned);
        }

        let mut path = Path::new();
        let leaf_id = self.find_leaf_recording(&key, &mut path);

        // Worst case: every node on the path splits and a new root appears
        self.nodes.try_reserve(path.len() + 2)?;

        let Some(leaf) = self.nodes[leaf_id.index()].as_leaf_mut() else {
            unreachable!("descent always ends at a leaf");
        };
        match leaf.search(&key) {
            Ok(pos) => {
                let previous = std::mem::replace(&mut leaf.values[pos], value);
                return Ok(Some(previous));
            }
            Err(pos) => leaf.try_insert(pos, key, value)?,
        }
        self.len += 1;

        if let Err(err) = self.split_upward(leaf_id, path) {
            error!(%err, "allocation failed mid-split; index is now read-only");
            self.poisoned = true;
            return Err(err.into());
        }
        Ok(None)
    }

    /// Number of entries stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn order(&self) -> usize {
        self.order.get()
    }

    /// Number of levels; a lone leaf root has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.root;
        while let Node::Internal(inner) = &self.nodes[current.index()] {
            current = inner.children[0];
            height += 1;
        }
        height
    }

    /// Total nodes allocated (nodes are never freed).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// `true` once an insert has failed mid-split.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Marks the index as if a split had failed part way.
    #[cfg(test)]
    pub(crate) fn poison(&mut self) {
        self.poisoned = true;
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &Node {
        &self.nodes[self.root.index()]
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Ordered iterator over every entry, walking the leaf chain.
    ///
    /// # Example
    /// ```
    /// use dictree::BPlusTreeIndex;
    ///
    /// let mut index = BPlusTreeIndex::with_order(3).unwrap();
    /// for word in ["pear", "apple", "fig", "kiwi"] {
    ///     index.insert(word.into(), "fruit".into()).unwrap();
    /// }
    /// let words: Vec<&str> = index.keys().collect();
    /// assert_eq!(words, ["apple", "fig", "kiwi", "pear"]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            index: self,
            leaf: Some(self.leftmost_leaf()),
            pos: 0,
            remaining: self.len,
        }
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Depth-first rendering of every node's keys, indented by depth.
    ///
    /// ```text
    /// internal #4 [c]
    ///   leaf #0 [a b]
    ///   leaf #1 [c d e]
    /// ```
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id.index()];
            let kind = if node.is_leaf() { "leaf" } else { "internal" };
            out.push_str(&format!(
                "{:indent$}{} {} [{}]\n",
                "",
                kind,
                id,
                node.keys().join(" "),
                indent = depth * 2
            ));
            if let Node::Internal(inner) = node {
                // Reverse so the leftmost child is printed first
                for child in inner.children.iter().rev() {
                    stack.push((*child, depth + 1));
                }
            }
        }
        out
    }


    // =========================
    // Descent helpers
    // =========================

    /// Returns the leaf that would contain `key`.
    pub(crate) fn find_leaf(&self, key: &str) -> NodeId {
        self.descend(key, |_, _| {})
    }

    /// Same as [`find_leaf`](Self::find_leaf) but records every internal
    /// node visited and the child slot taken.
    fn find_leaf_recording(&self, key: &str, path: &mut Path) -> NodeId {
        self.descend(key, |node, child| path.push((node, child)))
    }

    fn descend(&self, key: &str, mut visit: impl FnMut(NodeId, usize)) -> NodeId {
        let mut current = self.root;
        while let Node::Internal(inner) = &self.nodes[current.index()] {
            let idx = inner.child_index(key);
            visit(current, idx);
            current = inner.children[idx];
        }
        current
    }

    pub(crate) fn leftmost_leaf(&self) -> NodeId {
        let mut current = self.root;
        while let Node::Internal(inner) = &self.nodes[current.index()] {
            current = inner.children[0];
        }
        current
    }


    // =========================
    // Split helpers
    // =========================

    /// Splits `current` and each ancestor that overflows as a result.
    ///
    /// The parent's slot is reserved before the child is split, so a
    /// failure never strands a sibling without a separator.
    fn split_upward(&mut self, mut current: NodeId, mut path: Path) -> Result<(), TryReserveError> {
        let order = self.order.get();

        while self.nodes[current.index()].len() >= order {
            let parent = path.pop();
            if let Some((parent_id, _)) = parent {
                self.internal_mut(parent_id).reserve_slot()?;
            }

            let (separator, sibling) = self.split_node(current)?;

            match parent {
                Some((parent_id, child_idx)) => {
                    trace!(node = %current, parent = %parent_id, %separator, "promoted separator");
                    self.internal_mut(parent_id)
                        .insert_child(child_idx, separator, sibling);
                    current = parent_id;
                }
                None => {
                    self.grow_root(separator, sibling);
                    break;
                }
            }
        }
        Ok(())
    }

    /// Moves the upper half of an overflowing node into a new sibling.
    ///
    /// Returns the separator to promote and the sibling's handle. Leaf
    /// separators are copies of the sibling's first key; internal
    /// separators are removed from the node.
    fn split_node(&mut self, id: NodeId) -> Result<(String, NodeId), TryReserveError> {
        let mid = self.order.get() / 2;
        let sibling_id = NodeId::new(self.nodes.len());

        let (separator, sibling) = match &mut self.nodes[id.index()] {
            Node::Leaf(leaf) => {
                let right = leaf.split(mid)?;
                leaf.next = Some(sibling_id);
                (right.keys[0].clone(), Node::Leaf(right))
            }
            Node::Internal(inner) => {
                let (separator, right) = inner.split(mid)?;
                (separator, Node::Internal(right))
            }
        };

        debug!(node = %id, sibling = %sibling_id, leaf = sibling.is_leaf(), "split node");
        // Capacity was reserved up front by `insert`
        self.nodes.push(sibling);
        Ok((separator, sibling_id))
    }

    /// Replaces the root with a new internal node over the old root and
    /// its new sibling.
    fn grow_root(&mut self, separator: String, sibling: NodeId) {
        let new_root = NodeId::new(self.nodes.len());
        self.nodes.push(Node::Internal(InternalNode {
            keys: vec![separator],
            children: vec![self.root, sibling],
        }));
        self.root = new_root;
        debug!(root = %new_root, height = self.height(), "root split, tree grew");
    }

    fn internal_mut(&mut self, id: NodeId) -> &mut InternalNode {
        match self.nodes[id.index()].as_internal_mut() {
            Some(inner) => inner,
            None => unreachable!("path entries are internal nodes"),
        }
    }
}


/// Iterator over `(key, value)` pairs in ascending key order.
///
/// Created by [`BPlusTreeIndex::iter`]; follows the leaf chain without
/// re-descending the tree.
pub struct Iter<'a> {
    index: &'a BPlusTreeIndex,
    leaf: Option<NodeId>,
    pos: usize,
    remaining: usize,
}


impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let leaf = self.index.nodes[self.leaf?.index()].as_leaf()?;

            if self.pos < leaf.keys.len() {
                let item = (leaf.keys[self.pos].as_str(), leaf.values[self.pos].as_str());
                self.pos += 1;
                self.remaining = self.remaining.saturating_sub(1);
                return Some(item);
            }

            // Leaf exhausted - follow the chain
            self.leaf = leaf.next;
            self.pos = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}


impl<'a> IntoIterator for &'a BPlusTreeIndex {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
