// ============================================================
// File: loader.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 9, 2025
//
// Description:
//   Bulk loader for dictionary files. Each line holds one record,
//   `word<delimiter>meaning`, and every well-formed record is
//   inserted into the index.
//
// Rules:
// 1) Records are split at the FIRST delimiter, so meanings may
//    contain the delimiter themselves.
// 2) Lines without a delimiter, with an empty key, or with bytes
//    that are not UTF-8 are skipped and counted, never fatal.
// 3) A repeated word overwrites the earlier meaning (last write
//    wins), counted as `replaced`.
// ============================================================
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::BPlusTreeIndex;


/// Counts from a single load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// New keys added to the index.
    pub inserted: usize,
    /// Records whose key was already present.
    pub replaced: usize,
    /// Blank or malformed lines.
    pub skipped: usize,
}

impl LoadReport {
    /// Records that reached the index.
    pub fn applied(&self) -> usize {
        self.inserted + self.replaced
    }
}


/// Splits one line into a `(key, value)` record.
///
/// Returns `None` when the delimiter is missing or the key is empty.
///
/// # Example
/// ```
/// use dictree::config::LoaderConfig;
/// use dictree::loader::parse_record;
///
/// let cfg = LoaderConfig::default();
/// assert_eq!(
///     parse_record("apple, a round fruit, often red", &cfg),
///     Some(("apple".to_string(), "a round fruit, often red".to_string()))
/// );
/// assert_eq!(parse_record("no delimiter here", &cfg), None);
/// ```
pub fn parse_record(line: &str, config: &LoaderConfig) -> Option<(String, String)> {
    let (key, value) = line.split_once(config.delimiter)?;
    let (key, value) = if config.trim {
        (key.trim(), value.trim())
    } else {
        (key, value)
    };

    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}


/// Loads every record of the file at `path` into `index`.
///
/// # Errors
/// * `Error::Io` if the file cannot be opened or read.
/// * `Error::Index` if the index refuses an insert.
pub fn load_from_path(
    index: &mut BPlusTreeIndex,
    path: impl AsRef<Path>,
    config: &LoaderConfig,
) -> Result<LoadReport> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;

    let report = load_lines(index, BufReader::new(file), config, path)?;
    info!(
        path = %path.display(),
        inserted = report.inserted,
        replaced = report.replaced,
        skipped = report.skipped,
        "dictionary loaded"
    );
    Ok(report)
}


/// Loads records from any buffered reader (tests, stdin, in-memory data).
pub fn load_from_reader<R: BufRead>(
    index: &mut BPlusTreeIndex,
    reader: R,
    config: &LoaderConfig,
) -> Result<LoadReport> {
    load_lines(index, reader, config, Path::new("<reader>"))
}


fn load_lines<R: BufRead>(
    index: &mut BPlusTreeIndex,
    reader: R,
    config: &LoaderConfig,
    source: &Path,
) -> Result<LoadReport> {
    let mut report = LoadReport::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = match line {
            Ok(line) => line,
            // The offending bytes are already consumed, keep going
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!(line = line_no, "skipping line that is not valid UTF-8");
                report.skipped += 1;
                continue;
            }
            Err(e) => return Err(Error::io(source, e)),
        };

        // Ignore blank lines silently
        if line.trim().is_empty() {
            report.skipped += 1;
            continue;
        }

        let Some((key, value)) = parse_record(&line, config) else {
            warn!(line = line_no, record = %line, "skipping malformed record");
            report.skipped += 1;
            continue;
        };

        match index.insert(key, value)? {
            Some(_) => {
                debug!(line = line_no, "record replaced an earlier meaning");
                report.replaced += 1;
            }
            None => report.inserted += 1,
        }
    }

    Ok(report)
}
