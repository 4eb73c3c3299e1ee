//! Configuration parsing and defaults.
//!
//! Configuration lives in a TOML file (default
//! `~/.config/vigil/config.toml`, overridable via `VIGIL_CONFIG_PATH` or
//! `--config`). Every field has a default, so vigil runs with no config
//! file present; the default file is written on first load, and CLI
//! flags override file values.

use crate::digest;
use crate::snapshot::ReadErrorPolicy;
use crate::utils::thread_pool;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Monitoring policy settings.
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Performance tuning settings.
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Monitoring policy: interval, exclusions, failure handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Polling interval as a humantime string, e.g. `"10s"` or `"5m"`.
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Patterns excluded from every scan.
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    /// Per-file read failure policy.
    #[serde(default)]
    pub on_read_error: ReadErrorPolicy,

    /// Default baseline file used by `check` and `watch` when no
    /// `--baseline` flag is given.
    #[serde(default)]
    pub baseline_path: Option<PathBuf>,
}

/// Performance tuning. `chunk_size` affects I/O only; digests are
/// chunk-size independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Worker threads for parallel digest computation.
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,

    /// Digest read buffer size in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_interval() -> String {
    "10s".to_string()
}

fn default_ignore_patterns() -> Vec<String> {
    vec![".git".to_string(), "*.swp".to_string(), "*.tmp".to_string()]
}

fn default_parallel_threads() -> usize {
    thread_pool::default_threads()
}

fn default_chunk_size() -> usize {
    digest::DEFAULT_CHUNK_SIZE
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            ignore_patterns: default_ignore_patterns(),
            on_read_error: ReadErrorPolicy::default(),
            baseline_path: None,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_threads: default_parallel_threads(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl MonitorConfig {
    /// Parses the configured polling interval.
    ///
    /// # Errors
    /// Returns an error if the interval string is not a valid humantime
    /// duration or is zero.
    pub fn interval(&self) -> Result<Duration> {
        let duration = humantime::parse_duration(&self.interval)
            .with_context(|| format!("Invalid polling interval: {}", self.interval))?;
        if duration.is_zero() {
            anyhow::bail!("Polling interval must be greater than zero");
        }
        Ok(duration)
    }
}

impl Config {
    /// Loads configuration from a file, writing the defaults first if the
    /// file does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or created.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Saves configuration to a file, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if the directories or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }
}
