//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Run timer.
///
/// Turns timestamped game telemetry into named, deduplicated run segments,
/// split times and best-run comparisons.
#[derive(Debug, Parser)]
#[command(name = "rt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the display name of every event in a stream.
    Classify {
        /// Event file: JSONL of raw events, or a `.json` run.
        events: PathBuf,
    },

    /// Fold duplicate samples into segments and print them.
    Segments {
        /// Event file: JSONL of raw events, or a `.json` run.
        events: PathBuf,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the elapsed time and splits of one run.
    Run {
        /// Event file: JSONL of raw events, or a `.json` run.
        events: PathBuf,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compare attempts and select the best run.
    Best {
        /// One event file per attempt, oldest first.
        #[arg(required = true)]
        runs: Vec<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
