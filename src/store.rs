//! Baseline persistence.
//!
//! A stored baseline is a plain text table, one entry per line:
//! `<digest>  <path>` (two spaces, sha256sum-compatible). Writes go to a
//! temporary file in the destination directory followed by a rename, so a
//! failed cycle can never truncate or partially overwrite the stored
//! baseline.

use crate::snapshot::{FileRecord, Snapshot};
use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Persists a snapshot as a baseline file, atomically replacing any
/// previous baseline at `path`.
///
/// # Errors
/// Returns an error if the parent directory cannot be created or the
/// file cannot be written or renamed into place.
pub fn save(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            parent.to_path_buf()
        }
        _ => PathBuf::from("."),
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid baseline path: {}", path.display()))?;
    let tmp_path = parent.join(format!("{}.tmp", file_name.to_string_lossy()));

    let mut file = fs::File::create(&tmp_path)
        .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
    for record in snapshot.sorted_records() {
        writeln!(file, "{}  {}", record.digest, record.path.display())
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    }
    drop(file);

    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace baseline {}", path.display()))?;
    Ok(())
}

/// Loads a previously saved baseline.
///
/// # Errors
/// Returns an error if the file cannot be read or contains a malformed
/// entry (missing separator, or a digest that is not 64 lowercase hex
/// characters).
pub fn load(path: &Path) -> Result<Snapshot> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read baseline {}", path.display()))?;

    let mut files = HashMap::new();
    for (index, line) in data.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let Some((digest, raw_path)) = line.split_once("  ") else {
            bail!(
                "Malformed baseline entry at {}:{}",
                path.display(),
                index + 1
            );
        };
        if digest.len() != 64
            || !digest
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            bail!(
                "Invalid digest in baseline at {}:{}",
                path.display(),
                index + 1
            );
        }
        let record_path = PathBuf::from(raw_path);
        files.insert(
            record_path.clone(),
            FileRecord {
                path: record_path,
                digest: digest.to_string(),
            },
        );
    }

    Ok(Snapshot {
        files,
        skipped: Vec::new(),
    })
}
