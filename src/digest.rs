use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default read buffer size. Tuning this changes I/O behavior only,
/// never the resulting digest.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Computes the SHA-256 digest of raw bytes as lowercase hex.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Computes the SHA-256 digest of a file's content as a 64-character
/// lowercase hex string, reading in bounded chunks so memory use is
/// independent of file size.
///
/// # Errors
/// Returns an error if the file cannot be opened or read. Errors are
/// always surfaced; there is no placeholder digest.
pub fn hash_file(path: &Path) -> Result<String> {
    hash_file_with_chunk_size(path, DEFAULT_CHUNK_SIZE)
}

/// Like [`hash_file`] with an explicit chunk size.
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn hash_file_with_chunk_size(path: &Path, chunk_size: usize) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
