//! File access used by the pipelines
//!
//! Everything that touches the disk goes through [`FileStore`] so the
//! resolver and the override merger can be exercised against an in-memory
//! store in tests.

use std::path::Path;

use crate::error::{CoreError, Result};

/// Whole-file access: exists, load and overwrite
pub trait FileStore {
    /// Check whether `path` exists. A missing file is `Ok(false)`, anything
    /// else that prevents the check is an error.
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Read the whole file
    fn load(&self, path: &Path) -> Result<Vec<u8>>;

    /// Replace the whole file
    fn save(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// Read the whole file as UTF-8 text
    fn load_string(&self, path: &Path) -> Result<String> {
        let data = self.load(path)?;
        String::from_utf8(data).map_err(|e| CoreError::Read {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })
    }
}

/// [`FileStore`] backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl FileStore for LocalFileStore {
    fn exists(&self, path: &Path) -> Result<bool> {
        path.try_exists().map_err(|source| CoreError::Exists {
            path: path.to_path_buf(),
            source,
        })
    }

    fn load(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|source| CoreError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save(&self, path: &Path, data: &[u8]) -> Result<()> {
        std::fs::write(path, data).map_err(|source| CoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
