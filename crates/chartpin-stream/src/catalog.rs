//! Version catalogs
//!
//! A [`CatalogClient`] answers two questions: which version is pinned for a
//! `(kind, name)` pair, and which prefix a chart repository URL maps to.
//! [`VersionStream`] answers them from a checked-out stream directory.

use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use chartpin_core::{CoreError, FileStore, LocalFileStore};

use crate::error::{Result, StreamError};
use crate::kind::VersionKind;
use crate::prefixes::{REPOSITORIES_FILE, RepositoryPrefixes};

/// Source of pinned versions
pub trait CatalogClient: Send + Sync {
    /// The pinned version of `name`, or `None` when the stream has no pin
    fn stable_version(&self, kind: VersionKind, name: &str) -> Result<Option<String>>;

    /// The repository URL to prefix mapping
    fn repository_prefixes(&self) -> Result<RepositoryPrefixes>;
}

/// Pin file contents (`<kind dir>/<name>.yml`)
#[derive(Debug, Deserialize)]
struct StableVersion {
    #[serde(default)]
    version: Option<serde_yaml::Value>,
}

/// A version stream checked out on the local disk
#[derive(Debug)]
pub struct VersionStream {
    dir: PathBuf,
    prefixes: OnceCell<RepositoryPrefixes>,
}

impl VersionStream {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefixes: OnceCell::new(),
        }
    }

    /// Root directory of the checkout
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the pin file for `name`
    pub fn pin_path(&self, kind: VersionKind, name: &str) -> Result<PathBuf> {
        let relative = Path::new(name);
        let is_plain = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain {
            return Err(StreamError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self
            .dir
            .join(kind.dir_name())
            .join(format!("{}.yml", name)))
    }

    fn load_prefixes(&self) -> Result<RepositoryPrefixes> {
        let path = self.dir.join(REPOSITORIES_FILE);
        let store = LocalFileStore;
        let loaded = if store.exists(&path)? {
            store
                .load_string(&path)
                .and_then(|content| RepositoryPrefixes::from_yaml(&content))
        } else {
            tracing::warn!("version stream has no {}", REPOSITORIES_FILE);
            Ok(RepositoryPrefixes::new())
        };
        loaded.map_err(|source| StreamError::Prefixes { path, source })
    }
}

impl CatalogClient for VersionStream {
    fn stable_version(&self, kind: VersionKind, name: &str) -> Result<Option<String>> {
        let path = self.pin_path(kind, name)?;
        let store = LocalFileStore;
        if !store.exists(&path)? {
            tracing::debug!("no {} pin for {} at {}", kind, name, path.display());
            return Ok(None);
        }

        let content = store.load_string(&path).map_err(|source| StreamError::Pin {
            path: path.clone(),
            source,
        })?;
        let pin: StableVersion = serde_yaml::from_str(&content).map_err(|source| {
            StreamError::Pin {
                path: path.clone(),
                source: CoreError::Parse {
                    what: path.display().to_string(),
                    source,
                },
            }
        })?;

        let version = match pin.version {
            Some(serde_yaml::Value::String(s)) => s,
            Some(serde_yaml::Value::Number(n)) => {
                if n.is_f64() {
                    tracing::warn!(
                        "pin {} holds version {} as a YAML number; quote it to keep trailing zeros",
                        path.display(),
                        n
                    );
                }
                n.to_string()
            }
            _ => String::new(),
        };
        Ok(Some(version).filter(|v| !v.is_empty()))
    }

    fn repository_prefixes(&self) -> Result<RepositoryPrefixes> {
        self.prefixes
            .get_or_try_init(|| self.load_prefixes())
            .cloned()
    }
}

/// Catalog held entirely in memory
///
/// Useful for pinning from configuration and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    versions: HashMap<(VersionKind, String), String>,
    prefixes: RepositoryPrefixes,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, url: &str, prefix: impl Into<String>) -> Self {
        self.prefixes.insert(url, prefix);
        self
    }

    pub fn with_version(
        mut self,
        kind: VersionKind,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.versions.insert((kind, name.into()), version.into());
        self
    }
}

impl CatalogClient for StaticCatalog {
    fn stable_version(&self, kind: VersionKind, name: &str) -> Result<Option<String>> {
        Ok(self.versions.get(&(kind, name.to_string())).cloned())
    }

    fn repository_prefixes(&self) -> Result<RepositoryPrefixes> {
        Ok(self.prefixes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stream_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let charts = dir.path().join("charts");
        std::fs::create_dir_all(charts.join("stable")).unwrap();
        std::fs::write(
            charts.join("repositories.yml"),
            "repositories:\n- prefix: stable\n  urls:\n  - https://charts.example.com\n",
        )
        .unwrap();
        std::fs::write(charts.join("stable").join("nginx.yml"), "version: 1.2.3\n").unwrap();
        std::fs::write(charts.join("stable").join("float.yml"), "version: 2.5\n").unwrap();
        std::fs::write(charts.join("stable").join("zero.yml"), "version: 1.10\n").unwrap();
        std::fs::write(charts.join("stable").join("quoted.yml"), "version: '1.10'\n").unwrap();
        std::fs::write(charts.join("stable").join("blank.yml"), "version: \"\"\n").unwrap();
        std::fs::write(charts.join("stable").join("broken.yml"), "version: [\n").unwrap();
        dir
    }

    #[test]
    fn test_stable_version_from_pin_file() {
        let dir = stream_dir();
        let stream = VersionStream::new(dir.path());

        assert_eq!(
            stream.stable_version(VersionKind::Chart, "stable/nginx").unwrap(),
            Some("1.2.3".to_string())
        );
        assert_eq!(
            stream.stable_version(VersionKind::Chart, "stable/float").unwrap(),
            Some("2.5".to_string())
        );
    }

    #[test]
    fn test_unquoted_float_pin_drops_trailing_zero() {
        let dir = stream_dir();
        let stream = VersionStream::new(dir.path());

        assert_eq!(
            stream.stable_version(VersionKind::Chart, "stable/zero").unwrap(),
            Some("1.1".to_string())
        );
        assert_eq!(
            stream.stable_version(VersionKind::Chart, "stable/quoted").unwrap(),
            Some("1.10".to_string())
        );
    }

    #[test]
    fn test_missing_or_blank_pin_is_none() {
        let dir = stream_dir();
        let stream = VersionStream::new(dir.path());

        assert_eq!(stream.stable_version(VersionKind::Chart, "stable/redis").unwrap(), None);
        assert_eq!(stream.stable_version(VersionKind::Chart, "stable/blank").unwrap(), None);
        assert_eq!(stream.stable_version(VersionKind::Docker, "stable/nginx").unwrap(), None);
    }

    #[test]
    fn test_broken_pin_is_parse_error() {
        let dir = stream_dir();
        let stream = VersionStream::new(dir.path());

        let err = stream
            .stable_version(VersionKind::Chart, "stable/broken")
            .unwrap_err();

        assert_eq!(err.kind(), chartpin_core::ErrorKind::Parse);
    }

    #[test]
    fn test_names_cannot_escape_the_stream() {
        let dir = stream_dir();
        let stream = VersionStream::new(dir.path());

        for name in ["../secrets", "/etc/passwd", "", "stable/../nginx"] {
            let err = stream.stable_version(VersionKind::Chart, name).unwrap_err();
            assert!(matches!(err, StreamError::InvalidName { .. }), "name: {:?}", name);
        }
    }

    #[test]
    fn test_repository_prefixes() {
        let dir = stream_dir();
        let stream = VersionStream::new(dir.path());

        let prefixes = stream.repository_prefixes().unwrap();

        assert_eq!(prefixes.prefix_for_url("https://charts.example.com"), Some("stable"));
    }

    #[test]
    fn test_stream_without_repositories_file() {
        let dir = TempDir::new().unwrap();
        let stream = VersionStream::new(dir.path());

        assert!(stream.repository_prefixes().unwrap().is_empty());
    }

    #[test]
    fn test_static_catalog() {
        let catalog = StaticCatalog::new()
            .with_prefix("https://charts.example.com", "stable")
            .with_version(VersionKind::Chart, "stable/nginx", "1.2.3");

        assert_eq!(
            catalog.stable_version(VersionKind::Chart, "stable/nginx").unwrap(),
            Some("1.2.3".to_string())
        );
        assert_eq!(catalog.stable_version(VersionKind::Git, "stable/nginx").unwrap(), None);
        assert_eq!(
            catalog
                .repository_prefixes()
                .unwrap()
                .prefix_for_url("https://charts.example.com"),
            Some("stable")
        );
    }
}
