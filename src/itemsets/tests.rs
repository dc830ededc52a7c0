// =====================================================================
// File: itemsets/tests.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 11, 2025
//
// Description:
// Unit tests for the frequent-itemset miner.
// =====================================================================

use super::*;
use crate::config::MinerConfig;

fn set(items: &[&str]) -> Itemset {
    items.iter().map(|s| s.to_string()).collect()
}

fn grocery() -> Vec<Itemset> {
    vec![
        set(&["bread", "milk"]),
        set(&["bread", "diapers", "beer", "eggs"]),
        set(&["milk", "diapers", "beer", "cola"]),
        set(&["bread", "milk", "diapers", "beer"]),
        set(&["bread", "milk", "diapers", "cola"]),
    ]
}


// =====================================================================
// Unit tests cover transaction parsing
// =====================================================================
#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_items_are_trimmed_and_deduplicated() {
        let transactions = parse_transactions(" a , b ,a\n".as_bytes()).unwrap();
        assert_eq!(transactions, vec![set(&["a", "b"])]);
    }

    #[test]
    fn test_blank_lines_and_empty_items_dropped() {
        let data = "x,,y\n\n   \n,,\nz\n";
        let transactions = parse_transactions(data.as_bytes()).unwrap();
        assert_eq!(transactions, vec![set(&["x", "y"]), set(&["z"])]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_transactions("no/such/transactions.txt");
        assert!(matches!(result, Err(crate::Error::Io { .. })));
    }
}


// =====================================================================
// Unit tests cover support counting and candidate generation
// =====================================================================
#[cfg(test)]
mod support_tests {
    use super::*;

    #[test]
    fn test_support_counts_containing_transactions() {
        let candidates = vec![set(&["bread"]), set(&["cola"]), set(&["eggs"])];
        let frequent = calculate_support(&grocery(), &candidates, 2);

        assert_eq!(
            frequent,
            vec![
                FrequentItemset { items: set(&["bread"]), support: 4 },
                FrequentItemset { items: set(&["cola"]), support: 2 },
            ]
        );
    }

    #[test]
    fn test_min_support_one_keeps_every_seen_candidate() {
        let candidates = vec![set(&["eggs"]), set(&["caviar"])];
        let frequent = calculate_support(&grocery(), &candidates, 1);
        assert_eq!(frequent.len(), 1);
        assert_eq!(frequent[0].items, set(&["eggs"]));
    }

    #[test]
    fn test_candidates_from_singletons() {
        let frequent = vec![set(&["a"]), set(&["b"]), set(&["c"])];
        let candidates = generate_candidates(&frequent);
        assert_eq!(candidates, vec![set(&["a", "b"]), set(&["a", "c"]), set(&["b", "c"])]);
    }

    #[test]
    fn test_candidates_are_pruned_by_infrequent_subsets() {
        // {b c} is missing, so {a b c} cannot be frequent
        let frequent = vec![set(&["a", "b"]), set(&["a", "c"])];
        assert!(generate_candidates(&frequent).is_empty());
    }

    #[test]
    fn test_candidates_deduplicated() {
        let frequent = vec![set(&["a", "b"]), set(&["a", "c"]), set(&["b", "c"])];
        assert_eq!(generate_candidates(&frequent), vec![set(&["a", "b", "c"])]);
    }

    #[test]
    fn test_no_frequent_no_candidates() {
        assert!(generate_candidates(&[]).is_empty());
    }
}


// =====================================================================
// Unit tests cover the level-wise mining loop and its output format
// =====================================================================
#[cfg(test)]
mod mine_tests {
    use super::*;

    #[test]
    fn test_mine_grocery_levels() {
        let levels = mine(&grocery(), &MinerConfig::new(3).unwrap());

        let sizes: Vec<usize> = levels.iter().map(|l| l.size).collect();
        assert_eq!(sizes, vec![1, 2]);

        let singles: Vec<String> = levels[0].itemsets.iter().map(|f| f.to_string()).collect();
        assert_eq!(
            singles,
            vec![
                "{ beer } : 3",
                "{ bread } : 4",
                "{ diapers } : 4",
                "{ milk } : 4",
            ]
        );

        let pairs: Vec<String> = levels[1].itemsets.iter().map(|f| f.to_string()).collect();
        assert_eq!(
            pairs,
            vec![
                "{ beer diapers } : 3",
                "{ bread diapers } : 3",
                "{ bread milk } : 3",
                "{ diapers milk } : 3",
            ]
        );
    }

    #[test]
    fn test_every_level_respects_min_support() {
        let config = MinerConfig::new(2).unwrap();
        for level in mine(&grocery(), &config) {
            for itemset in &level.itemsets {
                assert_eq!(itemset.items.len(), level.size);
                assert!(itemset.support >= config.min_support());
            }
        }
    }

    #[test]
    fn test_mine_empty_input() {
        assert!(mine(&[], &MinerConfig::default()).is_empty());
    }

    #[test]
    fn test_threshold_above_every_count() {
        assert!(mine(&grocery(), &MinerConfig::new(6).unwrap()).is_empty());
    }

    #[test]
    fn test_level_display() {
        let level = FrequentLevel {
            size: 2,
            itemsets: vec![FrequentItemset { items: set(&["x", "y"]), support: 5 }],
        };
        assert_eq!(level.to_string(), "Frequent Itemsets of size 2:\n{ x y } : 5\n");
    }
}
