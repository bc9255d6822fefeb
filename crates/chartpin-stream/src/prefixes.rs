//! Repository URL to prefix mapping
//!
//! The stream lists every chart repository it knows about in
//! `charts/repositories.yml`:
//!
//! ```yaml
//! repositories:
//! - prefix: stable
//!   urls:
//!   - https://charts.example.com
//! ```
//!
//! Charts are then pinned under `charts/<prefix>/<name>.yml`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use chartpin_core::{CoreError, Result};

/// Location of the prefix list inside a version stream
pub const REPOSITORIES_FILE: &str = "charts/repositories.yml";

/// One repository entry of the prefix list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryPrefix {
    pub prefix: String,

    #[serde(default)]
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RepositoriesFile {
    #[serde(default)]
    repositories: Vec<RepositoryPrefix>,
}

/// Lookup table from repository URL to prefix
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepositoryPrefixes {
    by_url: HashMap<String, String>,
}

impl RepositoryPrefixes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(url, prefix)` pairs
    pub fn from_pairs<I, U, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: AsRef<str>,
        P: Into<String>,
    {
        let mut prefixes = Self::new();
        for (url, prefix) in pairs {
            prefixes.insert(url.as_ref(), prefix);
        }
        prefixes
    }

    /// Parse the `repositories.yml` format
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }
        let file: RepositoriesFile =
            serde_yaml::from_str(yaml).map_err(|source| CoreError::Parse {
                what: REPOSITORIES_FILE.to_string(),
                source,
            })?;

        let mut prefixes = Self::new();
        for repo in file.repositories {
            for url in &repo.urls {
                prefixes.insert(url, repo.prefix.clone());
            }
        }
        Ok(prefixes)
    }

    pub fn insert(&mut self, url: &str, prefix: impl Into<String>) {
        self.by_url.insert(normalize(url).to_string(), prefix.into());
    }

    /// Prefix registered for `url`, if any
    pub fn prefix_for_url(&self, url: &str) -> Option<&str> {
        self.by_url
            .get(normalize(url))
            .map(String::as_str)
            .filter(|p| !p.is_empty())
    }

    pub fn len(&self) -> usize {
        self.by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }
}

fn normalize(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}
