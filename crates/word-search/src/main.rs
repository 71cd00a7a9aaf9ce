//! CLI entry point for the word search.
//!
//! Usage:
//!   word-search search <puzzle.json> [options]
//!   word-search search --stdin [options]
//!   word-search compare <puzzle.json> [--iterations <n>]
//!
//! Options:
//!   --strategy <name>   all, backtracking-trie, dfs-trie or dfs-set (default: all)
//!   --iterations <n>    Runs per strategy when comparing (default: 10)
//!
//! Diagnostics go to stderr and are controlled by `RUST_LOG`.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use word_search::{Error, PuzzleInput, Result, SearchReport, Strategy, WordSearch};

#[derive(Parser)]
#[command(name = "word-search")]
#[command(about = "Find dictionary words on a letter grid")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a puzzle with one or every strategy
    Search {
        /// Path to puzzle JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read puzzle from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Strategy to run
        #[arg(long, value_enum, default_value_t = StrategyChoice::All)]
        strategy: StrategyChoice,
    },
    /// Time every strategy on the same puzzle
    Compare {
        /// Path to puzzle JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read puzzle from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Runs per strategy
        #[arg(long, default_value = "10")]
        iterations: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyChoice {
    All,
    BacktrackingTrie,
    DfsTrie,
    DfsSet,
}

impl StrategyChoice {
    fn strategies(self) -> Vec<Strategy> {
        match self {
            StrategyChoice::All => Strategy::ALL.to_vec(),
            StrategyChoice::BacktrackingTrie => vec![Strategy::BacktrackingTrie],
            StrategyChoice::DfsTrie => vec![Strategy::DfsTrie],
            StrategyChoice::DfsSet => vec![Strategy::DfsSet],
        }
    }
}

/// Output format for the search command
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchOutput {
    rows: usize,
    cols: usize,
    reports: Vec<SearchReport>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Search {
            file,
            stdin,
            strategy,
        } => {
            let ws = load_puzzle(file, stdin)?;

            let reports = strategy
                .strategies()
                .into_iter()
                .map(|s| ws.run(s))
                .collect();

            let output = SearchOutput {
                rows: ws.board().rows(),
                cols: ws.board().cols(),
                reports,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Compare {
            file,
            stdin,
            iterations,
        } => {
            let ws = load_puzzle(file, stdin)?;
            let comparison = ws.compare(iterations);

            for timing in &comparison.timings {
                info!(
                    strategy = ?timing.strategy,
                    average_us = timing.average_us,
                    "strategy timing"
                );
            }
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
    }
    Ok(())
}

/// Read and validate the puzzle JSON
fn load_puzzle(file: Option<PathBuf>, stdin: bool) -> Result<WordSearch> {
    let json_content = if stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(path) = file {
        info!(path = %path.display(), "reading puzzle");
        fs::read_to_string(&path)?
    } else {
        return Err(Error::MissingInput);
    };

    let input: PuzzleInput = serde_json::from_str(&json_content)?;
    Ok(WordSearch::from_input(input)?)
}
