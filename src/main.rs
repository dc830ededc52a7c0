// ============================================================
// File: main.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 11, 2025
//
// Description:
//   Entry point for the dictionary program. Two subcommands:
//
//     query <DICTIONARY>    -> Load a `word,meaning` file into the
//                              B+ tree, then answer commands from
//                              standard input (see lib.rs)
//     mine <TRANSACTIONS>   -> Print the frequent itemsets of a
//                              comma-separated transaction file
//
//   Responses go to standard output and logs go to standard
//   error, which allows automated black-box testing of the
//   query loop.
// ============================================================
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use dictree::config::{LoaderConfig, MinerConfig, Order, DEFAULT_DELIMITER, DEFAULT_MIN_SUPPORT, DEFAULT_ORDER};
use dictree::{itemsets, load_from_path, repl_loop, BPlusTreeIndex, Error, Result, Session};

#[derive(Parser, Debug)]
#[command(
    name = "dictree",
    version,
    about = "B+ tree dictionary and frequent-itemset miner",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "DICTREE_ORDER",
        default_value_t = DEFAULT_ORDER,
        help = "Maximum keys per node before it splits (at least 3)"
    )]
    order: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Load a dictionary file and answer GET/SET/KEYS/... on stdin")]
    Query {
        #[arg(value_name = "DICTIONARY")]
        dictionary: PathBuf,

        #[arg(long, default_value_t = DEFAULT_DELIMITER, help = "Separator between word and meaning")]
        delimiter: char,

        #[arg(long, help = "Keep surrounding whitespace in words and meanings")]
        no_trim: bool,
    },

    #[command(about = "Print frequent itemsets of a transaction file")]
    Mine {
        #[arg(value_name = "TRANSACTIONS")]
        transactions: PathBuf,

        #[arg(long, default_value_t = DEFAULT_MIN_SUPPORT, help = "Minimum number of containing transactions")]
        min_support: usize,
    },
}


/// Entry point for the dictionary program.
fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}


/// Logs go to stderr so stdout carries only command responses.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dictree=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}


fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Query { dictionary, delimiter, no_trim } => {
            let order = Order::new(cli.order)?;
            let config = LoaderConfig { delimiter, trim: !no_trim };

            // Load data from file before taking commands
            let mut index = BPlusTreeIndex::new(order);
            load_from_path(&mut index, &dictionary, &config)?;

            let mut session = Session::with_index(index);
            let stdin = io::stdin();
            repl_loop(&mut session, stdin.lock(), io::stdout().lock())
                .map_err(Error::Stdio)?;
        }

        Command::Mine { transactions, min_support } => {
            let config = MinerConfig::new(min_support)?;
            let records = itemsets::read_transactions(&transactions)?;
            for level in itemsets::mine(&records, &config) {
                print!("{level}");
            }
        }
    }
    Ok(())
}
