// =====================================================================
// File: itemsets/apriori.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 11, 2025
//
// Description:
// Level-wise (Apriori) frequent-itemset mining.
//
// Process:
// 1) Every distinct item becomes a 1-itemset candidate.
// 2) Candidates contained in at least `min_support` transactions are
//    kept as the frequent level.
// 3) Pairs of frequent k-itemsets whose union has k+1 items become the
//    next candidates, minus any with an infrequent k-subset.
// 4) Repeat until a level comes back empty.
// =====================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::config::MinerConfig;
use crate::error::{Error, Result};

/// A set of items. Also used for a single transaction.
pub type Itemset = BTreeSet<String>;


/// An itemset together with the number of transactions containing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentItemset {
    pub items: Itemset,
    pub support: usize,
}

impl fmt::Display for FrequentItemset {
    /// Formats as `{ a b } : 2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for item in &self.items {
            write!(f, "{} ", item)?;
        }
        write!(f, "}} : {}", self.support)
    }
}


/// Every frequent itemset of one size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentLevel {
    pub size: usize,
    pub itemsets: Vec<FrequentItemset>,
}

impl fmt::Display for FrequentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frequent Itemsets of size {}:", self.size)?;
        for itemset in &self.itemsets {
            writeln!(f, "{}", itemset)?;
        }
        Ok(())
    }
}


/// Reads one transaction per line from `reader`.
///
/// Items are separated by `,` and trimmed. Empty items and blank lines
/// are dropped.
///
/// # Example
/// ```
/// use dictree::itemsets::parse_transactions;
///
/// let data = "bread, milk\n\nmilk,eggs,,\n";
/// let transactions = parse_transactions(data.as_bytes()).unwrap();
/// assert_eq!(transactions.len(), 2);
/// assert!(transactions[1].contains("eggs"));
/// assert_eq!(transactions[1].len(), 2);
/// ```
pub fn parse_transactions<R: BufRead>(reader: R) -> Result<Vec<Itemset>> {
    parse_lines(reader, Path::new("<reader>"))
}

/// Reads the transaction file at `path`.
pub fn read_transactions(path: impl AsRef<Path>) -> Result<Vec<Itemset>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let transactions = parse_lines(BufReader::new(file), path)?;

    info!(
        path = %path.display(),
        transactions = transactions.len(),
        "transactions loaded"
    );
    Ok(transactions)
}

fn parse_lines<R: BufRead>(reader: R, source: &Path) -> Result<Vec<Itemset>> {
    let mut transactions = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| Error::io(source, e))?;
        let transaction: Itemset = line
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();

        if !transaction.is_empty() {
            transactions.push(transaction);
        }
    }
    Ok(transactions)
}


/// Counts how many transactions contain each candidate and keeps those
/// reaching `min_support`, in candidate order.
pub fn calculate_support(
    transactions: &[Itemset],
    candidates: &[Itemset],
    min_support: usize,
) -> Vec<FrequentItemset> {
    candidates
        .iter()
        .filter_map(|candidate| {
            let support = transactions
                .iter()
                .filter(|transaction| candidate.is_subset(transaction))
                .count();
            (support >= min_support).then(|| FrequentItemset {
                items: candidate.clone(),
                support,
            })
        })
        .collect()
}


/// Builds the `k+1` candidates from the frequent `k`-itemsets.
///
/// Each pair is unioned; unions of the wrong size are discarded, and so
/// is any candidate with a `k`-subset that is not frequent. The result
/// is sorted and free of duplicates.
pub fn generate_candidates(frequent: &[Itemset]) -> Vec<Itemset> {
    let Some(first) = frequent.first() else {
        return Vec::new();
    };
    let size = first.len() + 1;
    let known: BTreeSet<&Itemset> = frequent.iter().collect();

    let mut candidates = BTreeSet::new();
    for (i, left) in frequent.iter().enumerate() {
        for right in &frequent[i + 1..] {
            let union: Itemset = left.union(right).cloned().collect();
            if union.len() == size && all_subsets_frequent(&union, &known) {
                candidates.insert(union);
            }
        }
    }
    candidates.into_iter().collect()
}

/// Apriori pruning: every subset with one item removed must be frequent.
fn all_subsets_frequent(candidate: &Itemset, known: &BTreeSet<&Itemset>) -> bool {
    candidate.iter().all(|dropped| {
        let subset: Itemset = candidate
            .iter()
            .filter(|item| *item != dropped)
            .cloned()
            .collect();
        known.contains(&subset)
    })
}


/// Runs the level-wise search and returns every non-empty level,
/// starting at size 1.
///
/// # Example
/// ```
/// use dictree::config::MinerConfig;
/// use dictree::itemsets::{mine, parse_transactions};
///
/// let data = "a,b,c\na,b\na,c\nb,c\n";
/// let transactions = parse_transactions(data.as_bytes()).unwrap();
/// let levels = mine(&transactions, &MinerConfig::new(2).unwrap());
///
/// assert_eq!(levels.len(), 2);
/// assert_eq!(levels[1].to_string().lines().nth(1), Some("{ a b } : 2"));
/// ```
pub fn mine(transactions: &[Itemset], config: &MinerConfig) -> Vec<FrequentLevel> {
    let min_support = config.min_support();

    let items: BTreeSet<&String> = transactions.iter().flatten().collect();
    let mut candidates: Vec<Itemset> = items
        .into_iter()
        .map(|item| Itemset::from([item.clone()]))
        .collect();

    let mut levels = Vec::new();
    let mut size = 1;
    loop {
        let frequent = calculate_support(transactions, &candidates, min_support);
        debug!(
            size,
            candidates = candidates.len(),
            frequent = frequent.len(),
            "support counted"
        );
        if frequent.is_empty() {
            break;
        }

        let itemsets: Vec<Itemset> = frequent.iter().map(|f| f.items.clone()).collect();
        candidates = generate_candidates(&itemsets);
        levels.push(FrequentLevel {
            size,
            itemsets: frequent,
        });
        size += 1;
    }

    info!(
        transactions = transactions.len(),
        min_support,
        levels = levels.len(),
        "mining finished"
    );
    levels
}
