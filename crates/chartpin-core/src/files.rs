//! Well-known files inside a chart directory

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::FileStore;

/// Default chart values
pub const VALUES_FILE_NAME: &str = "values.yaml";

/// Encrypted or generated secret values
pub const SECRETS_FILE_NAME: &str = "secrets.yaml";

/// Local, usually uncommitted, value tweaks
pub const MY_VALUES_FILE_NAME: &str = "myvalues.yaml";

/// Values files in the order they are layered
pub const VALUES_FILE_NAMES: [&str; 3] = [VALUES_FILE_NAME, SECRETS_FILE_NAME, MY_VALUES_FILE_NAME];

/// Every values file present in `dir`, in [`VALUES_FILE_NAMES`] order
pub fn discover_values_files(store: &dyn FileStore, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for name in VALUES_FILE_NAMES {
        let path = dir.join(name);
        if store.exists(&path)? {
            found.push(path);
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFileStore;
    use tempfile::TempDir;

    #[test]
    fn test_discover_collects_all_existing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MY_VALUES_FILE_NAME), "a: 1\n").unwrap();
        std::fs::write(dir.path().join(VALUES_FILE_NAME), "b: 2\n").unwrap();

        let files = discover_values_files(&LocalFileStore, dir.path()).unwrap();

        assert_eq!(
            files,
            vec![
                dir.path().join(VALUES_FILE_NAME),
                dir.path().join(MY_VALUES_FILE_NAME),
            ]
        );
    }

    #[test]
    fn test_discover_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(discover_values_files(&LocalFileStore, dir.path()).unwrap().is_empty());
    }
}
