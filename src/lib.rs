#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # Vigil - Host-Based File Integrity Monitor
//!
//! Vigil detects unauthorized or unexpected modification of files under a
//! monitored directory tree. Each polling cycle recomputes a streaming
//! SHA-256 digest for every regular file, compares the resulting snapshot
//! against the previously recorded state, and reports every change as
//! added, removed, or modified.
//!
//! ## Architecture
//!
//! The codebase is organized into a few key modules:
//!
//! - [`digest`]: Streaming SHA-256 digest engine for single files
//! - [`snapshot`]: Tree walk, snapshot construction, and snapshot diffing
//! - [`monitor`]: The polling cycle driver (baseline handoff, cancellation)
//! - [`store`]: Baseline persistence as a `<digest>  <path>` table
//! - [`commands`]: CLI command implementations (snapshot, check, watch, hash)
//! - [`config`]: Configuration parsing and defaults
//! - [`output`]: Output formatting and verbosity control
//!
//! The digest engine has no dependency on the differ; the differ depends
//! on the digest engine; the monitor drives both.
//!
//! ## Example Usage
//!
//! ```no_run
//! use vigil::monitor::Monitor;
//! use vigil::snapshot::WalkOptions;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut monitor = Monitor::new("/etc", WalkOptions::default());
//!
//! // First cycle establishes the baseline.
//! monitor.run_cycle()?;
//!
//! // Subsequent cycles report changes against it.
//! let changes = monitor.run_cycle()?;
//! for change in &changes {
//!     println!("{} {}", change.status_char(), change.path.display());
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Commands module containing all CLI command implementations.
pub mod commands;

/// Configuration parsing and defaults.
pub mod config;

/// Streaming SHA-256 digest engine.
pub mod digest;

/// Polling cycle driver: baseline handoff and cancellation.
pub mod monitor;

/// Output formatting and verbosity control.
pub mod output;

/// Snapshot construction and diffing.
pub mod snapshot;

/// Baseline persistence.
pub mod store;

/// Utility functions and helpers.
pub mod utils;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Current version of the vigil binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to the home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/vigil/config.toml";

/// Central context for vigil operations: the loaded configuration and
/// where it came from.
#[derive(Debug, Clone)]
pub struct VigilContext {
    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl VigilContext {
    /// Creates a context, resolving the config path from the explicit
    /// override, the `VIGIL_CONFIG_PATH` environment variable, or the
    /// default location, in that order. Also sizes the digest worker
    /// pool from the loaded configuration.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined or
    /// the configuration cannot be read or created.
    pub fn new(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Some(path) = config_override {
            path
        } else if let Ok(path) = std::env::var("VIGIL_CONFIG_PATH") {
            PathBuf::from(path)
        } else {
            let home = dirs::home_dir().context("Could not find home directory")?;
            home.join(DEFAULT_CONFIG_PATH)
        };

        let config = config::Config::load(&config_path)?;
        utils::thread_pool::configure(config.performance.parallel_threads);

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Creates a context from an explicit config path, for tests.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or created.
    pub fn new_explicit(config_path: PathBuf) -> Result<Self> {
        let config = config::Config::load(&config_path)?;
        Ok(Self {
            config_path,
            config,
        })
    }

    /// Walk options derived from the loaded configuration.
    #[must_use]
    pub fn walk_options(&self) -> snapshot::WalkOptions {
        snapshot::WalkOptions {
            ignore_patterns: self.config.monitor.ignore_patterns.clone(),
            on_read_error: self.config.monitor.on_read_error,
            chunk_size: self.config.performance.chunk_size,
        }
    }
}
