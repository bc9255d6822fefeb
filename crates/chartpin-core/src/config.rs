//! Pipeline configuration (`chartpin.yml`)
//!
//! Looked up in the chart directory and then in each parent directory, so a
//! single file at the root of an environment repository covers every chart
//! below it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::fs::FileStore;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "chartpin.yml";

/// Git ref used when the configuration names none
pub const DEFAULT_VERSION_STREAM_REF: &str = "master";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Target cluster
    #[serde(default)]
    pub cluster: ClusterConfig,

    /// Where pinned versions come from
    #[serde(default)]
    pub version_stream: VersionStreamConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    /// Infrastructure flavor (`gke`, `eks`, `aks`, ...), selects provider overrides
    #[serde(default)]
    pub provider: String,

    /// Namespace the charts are deployed into
    #[serde(default)]
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionStreamConfig {
    /// Git URL or local directory of the version stream
    #[serde(default)]
    pub url: String,

    /// Branch, tag or commit to use
    #[serde(default, rename = "ref")]
    pub git_ref: String,
}

impl VersionStreamConfig {
    /// The configured ref, or [`DEFAULT_VERSION_STREAM_REF`]
    pub fn git_ref_or_default(&self) -> &str {
        if self.git_ref.is_empty() {
            DEFAULT_VERSION_STREAM_REF
        } else {
            &self.git_ref
        }
    }
}

impl PipelineConfig {
    /// Parse from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|source| CoreError::Parse {
            what: CONFIG_FILE_NAME.to_string(),
            source,
        })
    }

    /// Load configuration from a specific path
    pub fn load_from(store: &dyn FileStore, path: &Path) -> Result<Self> {
        let content = store.load_string(path)?;
        Self::from_yaml(&content).map_err(|e| match e {
            CoreError::Parse { source, .. } => CoreError::Parse {
                what: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Find the configuration for `dir`
    ///
    /// Returns the default configuration and no path when no
    /// `chartpin.yml` exists in `dir` or any of its ancestors. A relative
    /// `dir` is resolved against the current directory first, so `.` still
    /// sees its parents.
    pub fn discover(store: &dyn FileStore, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        let dir = std::path::absolute(dir).map_err(|source| CoreError::Exists {
            path: dir.to_path_buf(),
            source,
        })?;

        for candidate_dir in dir.ancestors() {
            let path = candidate_dir.join(CONFIG_FILE_NAME);
            if store.exists(&path)? {
                tracing::debug!("using pipeline configuration {}", path.display());
                let config = Self::load_from(store, &path)?;
                return Ok((config, Some(path)));
            }
        }
        tracing::debug!("no {} found above {}", CONFIG_FILE_NAME, dir.display());
        Ok((Self::default(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFileStore;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let config = PipelineConfig::from_yaml(
            r#"
cluster:
  provider: gke
  namespace: jx-staging
versionStream:
  url: https://github.com/example/versions.git
  ref: v1.4.0
"#,
        )
        .unwrap();

        assert_eq!(config.cluster.provider, "gke");
        assert_eq!(config.cluster.namespace, "jx-staging");
        assert_eq!(config.version_stream.url, "https://github.com/example/versions.git");
        assert_eq!(config.version_stream.git_ref_or_default(), "v1.4.0");
    }

    #[test]
    fn test_default_ref() {
        let config = PipelineConfig::from_yaml("versionStream:\n  url: /tmp/versions\n").unwrap();
        assert_eq!(config.version_stream.git_ref_or_default(), "master");
        assert!(config.cluster.provider.is_empty());
    }

    #[test]
    fn test_discover_in_parent_directory() {
        let root = TempDir::new().unwrap();
        let chart_dir = root.path().join("env").join("charts").join("app");
        std::fs::create_dir_all(&chart_dir).unwrap();
        std::fs::write(
            root.path().join("env").join(CONFIG_FILE_NAME),
            "cluster:\n  provider: eks\n",
        )
        .unwrap();

        let (config, path) = PipelineConfig::discover(&LocalFileStore, &chart_dir).unwrap();

        assert_eq!(config.cluster.provider, "eks");
        assert_eq!(path.unwrap(), root.path().join("env").join(CONFIG_FILE_NAME));
    }

    /// Store holding a fixed set of files, so discovery never sees the
    /// real filesystem above the fixture
    #[derive(Default)]
    struct FixedStore {
        files: HashMap<PathBuf, String>,
    }

    impl FixedStore {
        fn with(mut self, path: PathBuf, content: &str) -> Self {
            self.files.insert(path, content.to_string());
            self
        }
    }

    impl FileStore for FixedStore {
        fn exists(&self, path: &Path) -> Result<bool> {
            Ok(self.files.contains_key(path))
        }

        fn load(&self, path: &Path) -> Result<Vec<u8>> {
            self.files
                .get(path)
                .map(|content| content.as_bytes().to_vec())
                .ok_or_else(|| CoreError::Read {
                    path: path.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
        }

        fn save(&self, _path: &Path, _data: &[u8]) -> Result<()> {
            unreachable!("discovery never writes")
        }
    }

    #[test]
    fn test_discover_without_file_gives_default() {
        let (config, path) =
            PipelineConfig::discover(&FixedStore::default(), Path::new("/env/charts/app")).unwrap();

        assert_eq!(config, PipelineConfig::default());
        assert_eq!(path, None);
    }

    #[test]
    fn test_discover_nearest_ancestor_wins() {
        let store = FixedStore::default()
            .with(PathBuf::from("/chartpin.yml"), "cluster:\n  provider: aks\n")
            .with(PathBuf::from("/env/chartpin.yml"), "cluster:\n  provider: gke\n");

        let (config, path) =
            PipelineConfig::discover(&store, Path::new("/env/charts/app")).unwrap();

        assert_eq!(config.cluster.provider, "gke");
        assert_eq!(path, Some(PathBuf::from("/env/chartpin.yml")));
    }

    #[test]
    fn test_discover_from_current_directory_sees_parents() {
        let cwd = std::env::current_dir().unwrap();
        let parent = cwd.parent().unwrap().join(CONFIG_FILE_NAME);
        let store = FixedStore::default().with(parent.clone(), "cluster:\n  provider: eks\n");

        let (config, path) = PipelineConfig::discover(&store, Path::new(".")).unwrap();

        assert_eq!(config.cluster.provider, "eks");
        assert_eq!(path, Some(parent));
    }

    #[test]
    fn test_discover_relative_dir() {
        let cwd = std::env::current_dir().unwrap();
        let config_path = cwd.join("env").join(CONFIG_FILE_NAME);
        let store = FixedStore::default().with(config_path.clone(), "cluster:\n  provider: eks\n");

        let (_, path) = PipelineConfig::discover(&store, Path::new("env/charts/app")).unwrap();

        assert_eq!(path, Some(config_path));
    }
}
