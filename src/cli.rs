//! Command-line interface definitions for vigil.
//!
//! Argument parsing structures using clap's derive macros. Field-level
//! documentation is provided via clap attributes, so missing_docs is
//! allowed for this module.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for vigil.
#[derive(Parser)]
#[command(
    name = "vigil",
    version = crate::VERSION,
    about = "Lightweight host-based file integrity monitor",
    long_about = "Detects added, removed, and modified files under a monitored directory \
                  tree by comparing SHA-256 snapshots across polling cycles"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Capture a snapshot of a directory tree
    Snapshot {
        /// Root of the tree to snapshot
        root: String,

        /// Write the snapshot to a baseline file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        save: Option<PathBuf>,
    },

    /// Compare a directory tree against a stored baseline
    Check {
        /// Root of the tree to check
        root: String,

        /// Baseline file to compare against (default: monitor.baseline_path)
        #[arg(short, long, value_name = "FILE")]
        baseline: Option<PathBuf>,

        /// Replace the baseline with the current state after reporting
        #[arg(short, long)]
        update: bool,
    },

    /// Monitor a directory tree at a polling interval until interrupted
    Watch {
        /// Root of the tree to monitor
        root: String,

        /// Polling interval, e.g. "10s" or "5m" (default: monitor.interval)
        #[arg(short, long, value_name = "DURATION")]
        interval: Option<String>,

        /// Baseline file to resume from and persist after each cycle
        #[arg(short, long, value_name = "FILE")]
        baseline: Option<PathBuf>,
    },

    /// Print the SHA-256 digest of individual files
    Hash {
        /// Files to digest
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
