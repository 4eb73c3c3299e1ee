//! Snapshot construction: one complete pass over a monitored tree.
//!
//! A [`Snapshot`] maps every regular file reachable under a root to its
//! content digest at one observation instant. Symlinks and special files
//! are never followed and never digested, so a cyclic link cannot loop
//! the traversal. Per-file digests run in parallel; the map is assembled
//! only after the parallel pass completes, so a partially built snapshot
//! is never observable.

/// Pure comparison of two snapshots into classified change records.
pub mod diff;

pub use diff::{ChangeKind, ChangeRecord, diff};

use crate::digest;
use crate::utils::should_ignore;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// The observed content identity of one regular file at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Lowercase hex SHA-256 of the file content.
    pub digest: String,
}

/// What to do when a file or directory entry cannot be read during a
/// snapshot build.
///
/// Under `Skip`, the affected path is absent from the snapshot, which the
/// next diff reports as `Removed`; "deleted" and "became unreadable" are
/// therefore indistinguishable. Under `Abort` the whole build fails and
/// the caller's previous baseline stays in effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadErrorPolicy {
    /// Skip the unreadable entry, record a diagnostic, keep scanning.
    #[default]
    Skip,
    /// Fail the whole snapshot build on the first unreadable entry.
    Abort,
}

/// Tuning and policy knobs for a snapshot build.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Patterns excluded from the scan (matched against paths relative
    /// to the monitored root).
    pub ignore_patterns: Vec<String>,
    /// Per-entry read failure policy.
    pub on_read_error: ReadErrorPolicy,
    /// Digest read buffer size. Affects I/O only, never digest values.
    pub chunk_size: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            ignore_patterns: Vec::new(),
            on_read_error: ReadErrorPolicy::default(),
            chunk_size: digest::DEFAULT_CHUNK_SIZE,
        }
    }
}

/// The recorded state of a directory tree at one observation instant.
///
/// Immutable once built. `skipped` lists paths excluded by the
/// [`ReadErrorPolicy::Skip`] policy during this build; it is diagnostic
/// metadata and takes no part in diffing.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Every regular file under the root, keyed by absolute path.
    pub files: HashMap<PathBuf, FileRecord>,
    /// Paths that could not be read during this build (skip policy only).
    pub skipped: Vec<PathBuf>,
}

impl Snapshot {
    /// Builds a snapshot of every regular file under `root`.
    ///
    /// # Errors
    /// Returns an error if `root` does not exist or is not a directory,
    /// if the root itself cannot be listed, or, under
    /// [`ReadErrorPolicy::Abort`], if any entry cannot be read.
    pub fn build(root: &Path, options: &WalkOptions) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("Cannot resolve monitored root: {}", root.display()))?;
        if !root.is_dir() {
            anyhow::bail!("Monitored root is not a directory: {}", root.display());
        }

        let mut paths = Vec::new();
        let mut skipped = Vec::new();

        for entry in WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| {
                let relative = e.path().strip_prefix(&root).unwrap_or_else(|_| e.path());
                !should_ignore(relative, &options.ignore_patterns)
            })
        {
            match entry {
                Ok(entry) => {
                    // is_file() is false for symlinks because links are
                    // not followed, so links and special files drop out.
                    if entry.file_type().is_file() {
                        paths.push(entry.into_path());
                    }
                }
                Err(err) => {
                    // An unlistable root fails the build under either policy.
                    if err.depth() == 0 {
                        return Err(err)
                            .with_context(|| format!("Cannot list {}", root.display()));
                    }
                    match options.on_read_error {
                        ReadErrorPolicy::Abort => {
                            return Err(err)
                                .with_context(|| format!("Failed to scan {}", root.display()));
                        }
                        ReadErrorPolicy::Skip => {
                            let path = err.path().map(Path::to_path_buf);
                            warn!(
                                path = %path.as_deref().unwrap_or(root.as_path()).display(),
                                error = %err,
                                "skipping unreadable entry"
                            );
                            if let Some(path) = path {
                                skipped.push(path);
                            }
                        }
                    }
                }
            }
        }

        // Fan the digests out; each computation is independent and
        // side-effect-free. The map is assembled sequentially afterwards.
        let digests: Vec<(PathBuf, Result<String>)> = paths
            .into_par_iter()
            .map(|path| {
                let digest = digest::hash_file_with_chunk_size(&path, options.chunk_size);
                (path, digest)
            })
            .collect();

        let mut files = HashMap::with_capacity(digests.len());
        for (path, digest) in digests {
            match digest {
                Ok(digest) => {
                    files.insert(path.clone(), FileRecord { path, digest });
                }
                Err(err) => match options.on_read_error {
                    ReadErrorPolicy::Abort => return Err(err),
                    ReadErrorPolicy::Skip => {
                        warn!(path = %path.display(), error = %err, "skipping unreadable file");
                        skipped.push(path);
                    }
                },
            }
        }

        Ok(Self { files, skipped })
    }

    /// Number of files recorded in this snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no files are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Digest of `path`, if recorded.
    #[must_use]
    pub fn digest_of(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(|r| r.digest.as_str())
    }

    /// Records sorted by path, for stable rendering and persistence.
    #[must_use]
    pub fn sorted_records(&self) -> Vec<&FileRecord> {
        let mut records: Vec<&FileRecord> = self.files.values().collect();
        records.sort_by(|a, b| a.path.cmp(&b.path));
        records
    }
}
