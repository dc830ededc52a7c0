// =====================================================================
// File: itemsets/mod.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 11, 2025
//
//! Frequent-itemset mining over comma-separated transaction files.
//!
//! Structure:
//! - `apriori.rs` : Transaction parsing, support counting, candidate
//!                  generation and the level-wise [`mine`] loop.
//! - `tests.rs`   : Unit tests (compiled only in test mode).
//!
//! Items and itemsets are kept in `BTreeSet`s so every level prints in
//! the same order on every run.
// =====================================================================

pub mod apriori;

pub use self::apriori::{
    calculate_support, generate_candidates, mine, parse_transactions, read_transactions,
    FrequentItemset, FrequentLevel, Itemset,
};

#[cfg(test)]
pub mod tests;
