//! Classifying the difference between two snapshots.

use super::Snapshot;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a path changed between the previous and the current snapshot.
///
/// A content change is always `Modified`; it is never represented as a
/// removed-plus-added pair for the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Present in current, absent in previous.
    Added,
    /// Present in previous, absent in current.
    Removed,
    /// Present in both with differing digests.
    Modified,
}

/// One classified change, carrying the digest that best identifies the
/// observed state: the current digest for `Added`/`Modified`, the last
/// known digest for `Removed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Absolute path of the changed file.
    pub path: PathBuf,
    /// Classification of the change.
    pub kind: ChangeKind,
    /// Content digest associated with the change.
    pub digest: String,
}

impl ChangeRecord {
    /// Single-character representation of the change kind.
    #[must_use]
    pub const fn status_char(&self) -> char {
        match self.kind {
            ChangeKind::Added => 'A',
            ChangeKind::Modified => 'M',
            ChangeKind::Removed => 'D',
        }
    }
}

/// Compares two snapshots of the same root and classifies every changed
/// path. Pure function of its inputs: no I/O, no hidden state.
///
/// Paths present in both snapshots with equal digests produce no record;
/// unchanged is implicit. The result is sorted by kind then path for
/// stable reporting; the order carries no meaning.
#[must_use]
pub fn diff(previous: &Snapshot, current: &Snapshot) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();

    for (path, record) in &current.files {
        match previous.files.get(path) {
            None => changes.push(ChangeRecord {
                path: path.clone(),
                kind: ChangeKind::Added,
                digest: record.digest.clone(),
            }),
            Some(prev) if prev.digest != record.digest => changes.push(ChangeRecord {
                path: path.clone(),
                kind: ChangeKind::Modified,
                digest: record.digest.clone(),
            }),
            Some(_) => {}
        }
    }

    for (path, record) in &previous.files {
        if !current.files.contains_key(path) {
            changes.push(ChangeRecord {
                path: path.clone(),
                kind: ChangeKind::Removed,
                digest: record.digest.clone(),
            });
        }
    }

    changes.sort_by(|a, b| {
        a.status_char()
            .cmp(&b.status_char())
            .then_with(|| a.path.cmp(&b.path))
    });
    changes
}
