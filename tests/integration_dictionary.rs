// =====================================================================
// File: tests/integration_dictionary.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 12, 2025
//
// Description:
// End-to-end tests: load a dictionary file from disk, drive the query
// loop with a scripted transcript, and mine a transaction file.
// =====================================================================

use std::io::Write;

use dictree::config::{LoaderConfig, MinerConfig, Order};
use dictree::{itemsets, load_from_path, repl_loop, BPlusTreeIndex, Error, LoadReport, Session};
use tempfile::NamedTempFile;

/// Writes `contents` to a fresh temp file that lives as long as the handle.
fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Feeds `script` through the query loop and returns everything printed.
fn transcript(session: &mut Session, script: &str) -> String {
    let mut out = Vec::new();
    repl_loop(session, script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

const DICTIONARY: &str = "\
apple, a round fruit, often red
zebra,striped animal
mango,tropical fruit
kiwi,small fuzzy fruit
not a record
banana,long yellow fruit

cherry,small red fruit
apple,keeps the doctor away
";


#[test]
fn test_load_file_then_query() {
    let file = temp_file(DICTIONARY);
    let mut index = BPlusTreeIndex::new(Order::default());

    let report = load_from_path(&mut index, file.path(), &LoaderConfig::default()).unwrap();
    assert_eq!(report, LoadReport { inserted: 6, replaced: 1, skipped: 2 });
    assert!(index.height() > 1);

    let mut session = Session::with_index(index);
    let out = transcript(
        &mut session,
        "GET apple\nget kiwi\nGET durian\nSET durian smelly fruit\nGET durian\nSTATS\nEXIT\nGET zebra\n",
    );

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "keeps the doctor away",
            "small fuzzy fruit",
            "NOT FOUND",
            "OK",
            "smelly fruit",
            "keys=7 height=2 nodes=4 leaves=3 order=4 hits=3 misses=1",
            "Exiting...",
        ]
    );
}

#[test]
fn test_keys_after_load_are_sorted() {
    let file = temp_file(DICTIONARY);
    let mut index = BPlusTreeIndex::with_order(3).unwrap();
    load_from_path(&mut index, file.path(), &LoaderConfig::default()).unwrap();

    let mut session = Session::with_index(index);
    let out = transcript(&mut session, "KEYS\nVERIFY\n");
    assert_eq!(
        out,
        "apple\nbanana\ncherry\nkiwi\nmango\nzebra\nEND\nOK\n"
    );
}

#[test]
fn test_custom_delimiter_without_trim() {
    let file = temp_file("cat\t small feline\ndog\tloyal\n");
    let mut index = BPlusTreeIndex::default();
    let config = LoaderConfig { delimiter: '\t', trim: false };

    let report = load_from_path(&mut index, file.path(), &config).unwrap();
    assert_eq!(report.inserted, 2);
    assert_eq!(index.search("cat").unwrap(), " small feline");
}

#[test]
fn test_large_dictionary_stays_consistent() {
    let mut contents = String::new();
    for i in (0..2000).rev() {
        contents.push_str(&format!("word{:05},meaning {}\n", i, i));
    }
    let file = temp_file(&contents);

    let mut index = BPlusTreeIndex::with_order(5).unwrap();
    load_from_path(&mut index, file.path(), &LoaderConfig::default()).unwrap();

    let shape = index.verify().unwrap();
    assert_eq!(shape.keys, 2000);
    assert_eq!(index.search("word01234").unwrap(), "meaning 1234");
    assert_eq!(index.keys().next(), Some("word00000"));
}

#[test]
fn test_missing_dictionary_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.csv");

    let mut index = BPlusTreeIndex::default();
    let err = load_from_path(&mut index, &missing, &LoaderConfig::default()).unwrap_err();
    match &err {
        Error::Io { path, .. } => assert_eq!(path, &missing),
        other => panic!("expected Io error, got {other:?}"),
    }
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn test_mine_transaction_file() {
    let file = temp_file("milk, bread\nbread,butter\nmilk,bread,butter\n\nmilk,bread\n");
    let transactions = itemsets::read_transactions(file.path()).unwrap();
    assert_eq!(transactions.len(), 4);

    let levels = itemsets::mine(&transactions, &MinerConfig::new(2).unwrap());
    let printed: String = levels.iter().map(|l| l.to_string()).collect();
    assert_eq!(
        printed,
        "Frequent Itemsets of size 1:\n\
         { bread } : 4\n\
         { butter } : 2\n\
         { milk } : 3\n\
         Frequent Itemsets of size 2:\n\
         { bread butter } : 2\n\
         { bread milk } : 3\n"
    );
}

#[test]
fn test_multi_word_entries_are_queryable() {
    let file = temp_file("ice cream,frozen dessert\nhot dog,sausage in a bun\n");
    let mut index = BPlusTreeIndex::default();
    load_from_path(&mut index, file.path(), &LoaderConfig::default()).unwrap();
    assert_eq!(index.search("ice cream").unwrap(), "frozen dessert");

    let mut session = Session::with_index(index);
    let out = transcript(
        &mut session,
        "GET ice cream\nGET hot dog\nSET x a  b\nGET x\nKEYS\n",
    );
    assert_eq!(
        out,
        "frozen dessert\nsausage in a bun\nOK\na  b\nhot dog\nice cream\nx\nEND\n"
    );
}
