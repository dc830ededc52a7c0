//! # dictree
//! An in-memory dictionary backed by a B+ tree, plus a small
//! frequent-itemset miner.
//!
//! ## Features
//! - B+ tree index over string keys with leaf-to-leaf links
//! - Bulk loading of `word,meaning` files
//! - Interactive query loop: `GET`, `SET`, `KEYS`, `DUMP`, `STATS`,
//!   `VERIFY`, `EXIT` / `QUIT`
//! - Apriori frequent-itemset mining over comma-separated transactions
//!
//! ## Usage
//! This crate is primarily consumed by the binary in `main.rs`,
//! which provides the CLI. All reusable logic and unit tests live
//! here so the project can be tested with `cargo test`.
// =====================================================================
// File: lib.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 10, 2025
//
//   This module implements the query loop that accepts the following
//   commands (case-insensitive):
//
//     `GET <word>`            -> Meaning of the word, or NOT FOUND
//     `SET <word> <meaning>`  -> Insert or overwrite: OK
//     `KEYS`                  -> Every word in order, one per line, then END
//     `DUMP`                  -> Depth-first node listing of the tree
//     `STATS`                 -> Size, shape and lookup counters
//     `VERIFY`                -> OK, or the first broken tree invariant
//     `EXIT` / `QUIT`         -> Terminate the loop
// =====================================================================
pub mod config;
pub mod error;
pub use error::{ConfigError, Error, IndexError, Result};

pub mod index;
pub use index::BPlusTreeIndex;

pub mod loader;
pub use loader::{load_from_path, load_from_reader, LoadReport};

pub mod itemsets;

pub mod session;
pub use session::Session;

use std::io::{self, BufRead, Write};

/// Result of handling a single user command.
///
/// - `Continue` means the REPL should keep running.
/// - `Exit` means the REPL should break out and terminate.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Exit,
}

const PROPER_SYNTAX: &str =
    "Syntax Usage: GET <word>, SET <word> <meaning>, KEYS, DUMP, STATS, VERIFY, EXIT";


/// Read–Evaluate–Print Loop (REPL) over any line source.
///
/// Reads commands from `input` until EOF or `EXIT`, runs them against
/// the [`Session`], and writes responses to `output`.
///
/// # Example
/// ```
/// use dictree::{repl_loop, Session};
///
/// let mut session = Session::default();
/// let input = "SET cat small feline\nGET cat\nGET dog\nEXIT\n";
/// let mut output = Vec::new();
///
/// repl_loop(&mut session, input.as_bytes(), &mut output).unwrap();
/// let text = String::from_utf8(output).unwrap();
/// assert_eq!(text, "OK\nsmall feline\nNOT FOUND\nExiting...\n");
/// ```
pub fn repl_loop<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
) -> io::Result<()> {
    for input_line in input.lines() {
        let full_command = input_line?;
        let (cmd, rest) = parse_command(&full_command);

        // Process command and its argument text
        let result = handle_command(&cmd, rest, session, &mut output)?;
        output.flush()?;
        if result == CommandResult::Exit {
            break;
        }
    }
    Ok(())
}


/// Parses a raw input line into a command and the rest of the line.
///
/// The first token is treated as the command (normalized to uppercase).
/// The remainder is returned untouched apart from leading whitespace, so
/// words and meanings may contain spaces.
pub fn parse_command(line: &str) -> (String, &str) {
    let line = line.trim_start();
    // Normalize if lowercase is used
    match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd.to_uppercase(), rest.trim_start()),
        None => (line.to_uppercase(), ""),
    }
}


/// Handles a single user command and returns whether the REPL should
/// continue or exit.
///
/// Only supported commands will operate; any other input prints an error
/// and redisplays the syntax.
pub fn handle_command<W: Write>(
    cmd: &str,
    rest: &str,
    session: &mut Session,
    out: &mut W,
) -> io::Result<CommandResult> {
    match cmd {

        // Get command format:  GET <word>, the word may contain spaces
        "GET" => {
            let key = rest.trim_end();
            if key.is_empty() {
                writeln!(out, "ERROR: GET requires a word")?;
            } else {
                match session.lookup(key) {
                    Some(value) => writeln!(out, "{}", value)?,
                    None => writeln!(out, "NOT FOUND")?,
                }
            }
        }

        // Set command format:  SET <word> <meaning...>
        "SET" => match rest.split_once(char::is_whitespace) {
            Some((key, meaning)) if !meaning.trim().is_empty() => {
                // Inner spacing of the meaning is kept as typed
                let meaning = meaning.trim();
                match session.index.insert(key.to_string(), meaning.to_string()) {
                    Ok(_) => writeln!(out, "OK")?,
                    Err(e) => writeln!(out, "ERROR: {}", e)?,
                }
            }
            _ => writeln!(out, "ERROR: SET requires a word and meaning")?,
        },

        // Ordered walk over the leaf chain
        "KEYS" => {
            for key in session.index.keys() {
                writeln!(out, "{}", key)?;
            }
            writeln!(out, "END")?;
        }

        "DUMP" => write!(out, "{}", session.index.dump())?,

        "STATS" => {
            let index = &session.index;
            writeln!(
                out,
                "keys={} height={} nodes={} leaves={} order={} hits={} misses={}",
                index.len(),
                index.height(),
                index.node_count(),
                index.leaf_count(),
                index.order(),
                session.hits,
                session.misses
            )?;
        }

        "VERIFY" => match session.index.verify() {
            Ok(_) => writeln!(out, "OK")?,
            Err(violation) => writeln!(out, "ERROR: {}", violation)?,
        },

        // Exit command
        "EXIT" | "QUIT" => {
            writeln!(out, "Exiting...")?;
            return Ok(CommandResult::Exit);
        }

        // Empty input
        "" => writeln!(out, "Enter a command.")?,

        // Everything else will be noted and returned as an error
        _ => {
            writeln!(out, "ERROR: command '{}' not handled", cmd)?;
            writeln!(out, "{}", PROPER_SYNTAX)?;
        }
    }
    Ok(CommandResult::Continue)
}



// =================================================================
// lib.rs Unit tests
// =================================================================
