// =====================================================================
// File: index/verify.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 13, 2025
//
//! Structural checks for [`BPlusTreeIndex`].
//!
//! [`BPlusTreeIndex::verify`] walks every node from the root and then
//! the leaf chain, and reports the first broken invariant. Used by the
//! property tests and the REPL `VERIFY` command.
// =====================================================================

use thiserror::Error;

use super::node::{Node, NodeId};
use super::tree::BPlusTreeIndex;

/// Summary of a tree that passed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeShape {
    pub height: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub keys: usize,
}

/// The first invariant found broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("node {node} keys are not strictly ascending at position {pos}")]
    UnsortedKeys { node: NodeId, pos: usize },

    #[error("node {node} holds {len} keys, order is {order}")]
    Overfull { node: NodeId, len: usize, order: usize },

    #[error("non-root node {node} is empty")]
    EmptyNode { node: NodeId },

    #[error("internal node {node} has {keys} keys but {children} children")]
    ChildCount { node: NodeId, keys: usize, children: usize },

    #[error("leaf {node} has {keys} keys but {values} values")]
    ValueCount { node: NodeId, keys: usize, values: usize },

    #[error("key '{key}' in node {node} lies outside its separator bounds")]
    OutOfRange { node: NodeId, key: String },

    #[error("leaf {node} sits at depth {depth}, expected {expected}")]
    UnevenDepth { node: NodeId, depth: usize, expected: usize },

    #[error("leaf chain diverges from tree order at leaf {node}")]
    BrokenChain { node: NodeId },

    #[error("tree holds {found} keys but reports {expected}")]
    LengthMismatch { found: usize, expected: usize },
}


impl BPlusTreeIndex {
    /// Checks every structural invariant of the tree.
    ///
    /// # Example
    /// ```
    /// use dictree::BPlusTreeIndex;
    ///
    /// let mut index = BPlusTreeIndex::with_order(3).unwrap();
    /// for word in ["c", "a", "b", "e", "d"] {
    ///     index.insert(word.into(), word.to_uppercase()).unwrap();
    /// }
    /// let shape = index.verify().unwrap();
    /// assert_eq!(shape.keys, 5);
    /// assert_eq!(shape.height, index.height());
    /// ```
    pub fn verify(&self) -> Result<TreeShape, InvariantViolation> {
        let mut walk = Walk {
            index: self,
            leaves: Vec::new(),
            leaf_depth: None,
            keys: 0,
        };
        walk.visit(self.root_id(), 1, None, None)?;

        if walk.keys != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                found: walk.keys,
                expected: self.len(),
            });
        }
        self.verify_chain(&walk.leaves)?;

        Ok(TreeShape {
            height: walk.leaf_depth.unwrap_or(1),
            nodes: self.node_count(),
            leaves: walk.leaves.len(),
            keys: walk.keys,
        })
    }

    /// The chain must visit exactly the leaves found by the depth-first
    /// walk, in the same left-to-right order, and then stop.
    fn verify_chain(&self, leaves: &[NodeId]) -> Result<(), InvariantViolation> {
        let mut current = Some(self.leftmost_leaf());

        for &expected in leaves {
            match current {
                Some(id) if id == expected => {
                    current = self
                        .node(id)
                        .and_then(Node::as_leaf)
                        .and_then(|leaf| leaf.next);
                }
                _ => return Err(InvariantViolation::BrokenChain { node: expected }),
            }
        }

        match current {
            None => Ok(()),
            Some(extra) => Err(InvariantViolation::BrokenChain { node: extra }),
        }
    }
}


/// State carried through the depth-first walk.
struct Walk<'a> {
    index: &'a BPlusTreeIndex,
    leaves: Vec<NodeId>,
    leaf_depth: Option<usize>,
    keys: usize,
}


impl Walk<'_> {
    /// Every key under `id` must lie in `[lower, upper)`.
    fn visit(
        &mut self,
        id: NodeId,
        depth: usize,
        lower: Option<&str>,
        upper: Option<&str>,
    ) -> Result<(), InvariantViolation> {
        let index = self.index;
        let Some(node) = index.node(id) else {
            return Err(InvariantViolation::BrokenChain { node: id });
        };
        let keys = node.keys();
        let order = index.order();

        if keys.len() >= order {
            return Err(InvariantViolation::Overfull { node: id, len: keys.len(), order });
        }
        if keys.is_empty() && id != index.root_id() {
            return Err(InvariantViolation::EmptyNode { node: id });
        }
        if let Some(pos) = keys.windows(2).position(|w| w[0] >= w[1]) {
            return Err(InvariantViolation::UnsortedKeys { node: id, pos: pos + 1 });
        }
        for key in keys {
            let below = lower.is_some_and(|lo| key.as_str() < lo);
            let above = upper.is_some_and(|hi| key.as_str() >= hi);
            if below || above {
                return Err(InvariantViolation::OutOfRange { node: id, key: key.clone() });
            }
        }

        match node {
            Node::Leaf(leaf) => {
                if leaf.values.len() != leaf.keys.len() {
                    return Err(InvariantViolation::ValueCount {
                        node: id,
                        keys: leaf.keys.len(),
                        values: leaf.values.len(),
                    });
                }
                match self.leaf_depth {
                    Some(expected) if expected != depth => {
                        return Err(InvariantViolation::UnevenDepth { node: id, depth, expected });
                    }
                    _ => self.leaf_depth = Some(depth),
                }
                self.leaves.push(id);
                self.keys += leaf.keys.len();
            }
            Node::Internal(inner) => {
                if inner.children.len() != inner.keys.len() + 1 {
                    return Err(InvariantViolation::ChildCount {
                        node: id,
                        keys: inner.keys.len(),
                        children: inner.children.len(),
                    });
                }
                for (i, &child) in inner.children.iter().enumerate() {
                    let lo = if i == 0 { lower } else { Some(inner.keys[i - 1].as_str()) };
                    let hi = inner.keys.get(i).map(String::as_str).or(upper);
                    self.visit(child, depth + 1, lo, hi)?;
                }
            }
        }
        Ok(())
    }
}
