//! Opening a version stream from its configured location
//!
//! Local directories (plain paths or `file://` URLs) are used in place.
//! Anything else is treated as a git remote and checked out into the user
//! cache directory, one checkout per URL, refreshed on every open.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::process::Command;

use chartpin_core::{CoreError, VersionStreamConfig};

use crate::catalog::VersionStream;
use crate::error::{Result, StreamError};

/// Where a version stream comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStreamSource {
    pub url: String,
    pub git_ref: String,
    cache_dir: Option<PathBuf>,
}

impl VersionStreamSource {
    pub fn new(url: impl Into<String>, git_ref: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            git_ref: git_ref.into(),
            cache_dir: None,
        }
    }

    pub fn from_config(config: &VersionStreamConfig) -> Self {
        Self::new(config.url.clone(), config.git_ref_or_default())
    }

    /// Check remote streams out below `dir` instead of the user cache directory
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Local directory of the stream, if the URL names one
    pub fn local_dir(&self) -> Option<PathBuf> {
        if let Some(path) = self.url.strip_prefix("file://") {
            return Some(PathBuf::from(path));
        }
        let path = Path::new(&self.url);
        path.is_dir().then(|| path.to_path_buf())
    }

    /// Directory a remote stream is checked out into
    pub fn checkout_dir(&self) -> Result<PathBuf> {
        let root = match &self.cache_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .ok_or(StreamError::NoCacheDir)?
                .join("chartpin")
                .join("version-streams"),
        };
        let digest = hex::encode(Sha256::digest(self.url.as_bytes()));
        Ok(root.join(&digest[..16]))
    }

    /// Make the stream available on disk
    pub fn open(&self) -> Result<VersionStream> {
        if self.url.is_empty() {
            return Err(StreamError::MissingSource);
        }

        if let Some(dir) = self.local_dir() {
            tracing::debug!("using local version stream {}", dir.display());
            return Ok(VersionStream::new(dir));
        }

        let dir = self.checkout_dir()?;
        tracing::info!(
            "fetching version stream {} at {} into {}",
            self.url,
            self.git_ref,
            dir.display()
        );
        self.checkout(&dir)?;
        Ok(VersionStream::new(dir))
    }

    fn checkout(&self, dir: &Path) -> Result<()> {
        if !dir.join(".git").is_dir() {
            std::fs::create_dir_all(dir).map_err(|source| CoreError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
            self.git(dir, &["init", "--quiet"])?;
            self.git(dir, &["remote", "add", "origin", &self.url])?;
        }
        self.git(dir, &["fetch", "--quiet", "--depth", "1", "origin", &self.git_ref])?;
        self.git(dir, &["checkout", "--quiet", "--force", "FETCH_HEAD"])
    }

    fn git(&self, dir: &Path, args: &[&str]) -> Result<()> {
        tracing::debug!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(StreamError::Git)?;

        if output.status.success() {
            return Ok(());
        }
        Err(StreamError::Checkout {
            url: self.url.clone(),
            git_ref: self.git_ref.clone(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
