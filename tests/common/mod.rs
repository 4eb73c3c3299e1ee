use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Monitored-tree fixture for integration tests.
pub struct TestTree {
    pub temp_dir: TempDir,
}

impl TestTree {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Root of the monitored tree.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes a file relative to the tree root, creating parent
    /// directories as needed. Returns the absolute (canonical) path.
    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path.canonicalize()?)
    }

    /// Removes a file relative to the tree root.
    pub fn remove(&self, relative: &str) -> Result<()> {
        fs::remove_file(self.path().join(relative))?;
        Ok(())
    }
}
