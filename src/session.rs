// =====================================================================
// File: session.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 10, 2025
//
// Description:
// Defines the `Session` struct, the running context of one query loop:
// the loaded dictionary index and the lookup counters reported by the
// `STATS` command.
// =====================================================================

use crate::config::Order;
use crate::BPlusTreeIndex;

/// Represents a single interactive dictionary session.
#[derive(Debug, Default)]
pub struct Session {
    /// The dictionary index (B+ tree).
    pub index: BPlusTreeIndex,

    /// Lookups that found a meaning.
    pub hits: usize,

    /// Lookups for words not in the dictionary.
    pub misses: usize,
}


impl Session {
    /// Creates a session over an empty index of the given order.
    ///
    /// # Example
    /// ```
    /// use dictree::Session;
    /// use dictree::config::Order;
    ///
    /// let session = Session::new(Order::default());
    /// assert!(session.index.is_empty());
    /// assert_eq!(session.hits + session.misses, 0);
    /// ```
    pub fn new(order: Order) -> Self {
        Self::with_index(BPlusTreeIndex::new(order))
    }

    /// Wraps an already loaded index.
    pub fn with_index(index: BPlusTreeIndex) -> Self {
        Self {
            index,
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up a word and records whether it was found.
    pub fn lookup(&mut self, key: &str) -> Option<&str> {
        match self.index.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }
}


// =====================================================================
// Unit Tests for Session
// =====================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_initial_state() {
        let session = Session::new(Order::default());

        assert!(session.index.search("nothing").is_err());
        assert_eq!(session.hits, 0);
        assert_eq!(session.misses, 0);
    }

    #[test]
    fn test_lookup_counts_hits_and_misses() {
        let mut session = Session::default();
        session.index.insert("color".into(), "blue".into()).unwrap();

        assert_eq!(session.lookup("color"), Some("blue"));
        assert_eq!(session.lookup("colour"), None);
        assert_eq!(session.lookup("color"), Some("blue"));

        assert_eq!(session.hits, 2);
        assert_eq!(session.misses, 1);
    }

    #[test]
    fn test_with_index_keeps_contents() {
        let mut index = BPlusTreeIndex::with_order(3).unwrap();
        index.insert("fruit".into(), "apple".into()).unwrap();

        let session = Session::with_index(index);
        assert_eq!(session.index.len(), 1);
        assert_eq!(session.index.order(), 3);
    }
}
