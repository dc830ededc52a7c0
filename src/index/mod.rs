// =====================================================================
// File: index/mod.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 7, 2025
//
//! The `index` module contains the B+ tree that backs the dictionary.
//!
//! Structure:
//! - `node.rs`   : Defines [`Node`], [`LeafNode`], [`InternalNode`] and
//!                 the [`NodeId`] arena handle.
//! - `tree.rs`   : Defines the [`BPlusTreeIndex`] and its algorithms
//!                 (insert, search, split propagation, leaf-chain walk).
//! - `verify.rs` : Structural invariant checker.
//! - `tests.rs`  : Unit tests for the B+ tree (compiled only in test mode).
//!
//! The index never performs I/O; loading and querying live in the
//! `loader` module and the REPL in `lib.rs`.
// =====================================================================

pub mod node;
pub mod tree;
pub mod verify;

pub use self::node::{InternalNode, LeafNode, Node, NodeId};
pub use self::tree::{BPlusTreeIndex, Iter};
pub use self::verify::{InvariantViolation, TreeShape};
