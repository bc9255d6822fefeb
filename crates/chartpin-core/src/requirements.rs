//! Chart requirements (`requirements.yaml`)

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::error::{CoreError, Result};
use crate::fs::FileStore;

/// Conventional name of the requirements file inside a chart directory
pub const REQUIREMENTS_FILE_NAME: &str = "requirements.yaml";

/// A single chart dependency
///
/// Keys the pipeline does not interpret (`condition`, `tags`,
/// `import-values`, ...) are kept in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Chart name
    pub name: String,

    /// Pinned version
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar_string"
    )]
    pub version: Option<String>,

    /// Repository URL the chart is fetched from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Alternative name for the dependency within the parent chart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Dependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            repository: None,
            alias: None,
            extra: IndexMap::new(),
        }
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The name the dependency is known by inside the parent chart
    pub fn effective_name(&self) -> &str {
        match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() => alias,
            _ => &self.name,
        }
    }

    /// Pinned version, treating an empty string as unpinned
    pub fn pinned_version(&self) -> Option<&str> {
        self.version.as_deref().filter(|v| !v.is_empty())
    }

    /// Repository URL, treating an empty string as absent
    pub fn repository_url(&self) -> Option<&str> {
        self.repository.as_deref().filter(|r| !r.is_empty())
    }
}

/// Accept `version: 1.2` (a YAML float) as well as quoted strings
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => {
            if n.is_f64() {
                tracing::warn!(
                    "version {} was written as a YAML number; quote it to keep trailing zeros",
                    n
                );
            }
            Ok(Some(n.to_string()))
        }
        Some(serde_yaml::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a version string, got {:?}",
            other
        ))),
    }
}

/// The whole requirements file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementsDocument {
    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl RequirementsDocument {
    pub fn new(dependencies: Vec<Dependency>) -> Self {
        Self {
            dependencies,
            extra: IndexMap::new(),
        }
    }

    /// Parse from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|source| CoreError::Parse {
            what: REQUIREMENTS_FILE_NAME.to_string(),
            source,
        })
    }

    /// Serialize to YAML text
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|source| CoreError::Serialize {
            what: REQUIREMENTS_FILE_NAME.to_string(),
            source,
        })
    }

    /// Load a requirements file through `store`
    pub fn load(store: &dyn FileStore, path: &Path) -> Result<Self> {
        let content = store.load_string(path)?;
        Self::from_yaml(&content).map_err(|e| match e {
            CoreError::Parse { source, .. } => CoreError::Parse {
                what: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Overwrite the requirements file at `path` with this document
    pub fn save(&self, store: &dyn FileStore, path: &Path) -> Result<()> {
        let content = self.to_yaml()?;
        store.save(path, content.as_bytes())
    }

    /// Dependencies without a pinned version
    pub fn unpinned(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .filter(|d| d.pinned_version().is_none())
    }
}
