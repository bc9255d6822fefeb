//! Per-run configuration and catalog handle

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chartpin_core::{LocalFileStore, PipelineConfig};
use chartpin_stream::{CatalogClient, LazyCatalog, VersionStreamSource};
use clap::Args;

use crate::error::Result;

/// Flags that override `chartpin.yml`
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Version stream git URL or local directory
    #[arg(long, env = "CHARTPIN_VERSION_STREAM_URL", global = true)]
    pub version_stream_url: Option<String>,

    /// Version stream branch, tag or commit
    #[arg(long, env = "CHARTPIN_VERSION_STREAM_REF", global = true)]
    pub version_stream_ref: Option<String>,

    /// Cluster provider selecting the value overrides (gke, eks, ...)
    #[arg(long, env = "CHARTPIN_PROVIDER", global = true)]
    pub provider: Option<String>,
}

impl ConfigArgs {
    fn apply(&self, config: &mut PipelineConfig) {
        if let Some(url) = &self.version_stream_url {
            config.version_stream.url = url.clone();
        }
        if let Some(git_ref) = &self.version_stream_ref {
            config.version_stream.git_ref = git_ref.clone();
        }
        if let Some(provider) = &self.provider {
            config.cluster.provider = provider.clone();
        }
    }
}

/// Everything a command needs, built once at its start
#[derive(Debug)]
pub struct RunContext {
    /// Chart directory the command works on
    pub dir: PathBuf,
    pub config: PipelineConfig,
    catalog: Arc<LazyCatalog>,
}

impl RunContext {
    pub fn load(dir: &Path, args: &ConfigArgs) -> Result<Self> {
        let (mut config, _) = PipelineConfig::discover(&LocalFileStore, dir)?;
        args.apply(&mut config);

        let catalog = Arc::new(LazyCatalog::new(VersionStreamSource::from_config(
            &config.version_stream,
        )));

        Ok(Self {
            dir: dir.to_path_buf(),
            config,
            catalog,
        })
    }

    /// The shared catalog; the stream is opened on its first lookup
    pub fn catalog(&self) -> Arc<dyn CatalogClient> {
        self.catalog.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("chartpin.yml"),
            "cluster:\n  provider: gke\nversionStream:\n  url: https://example.com/versions.git\n",
        )
        .unwrap();
        let args = ConfigArgs {
            version_stream_ref: Some("v1.0.0".to_string()),
            provider: Some("eks".to_string()),
            ..Default::default()
        };

        let ctx = RunContext::load(dir.path(), &args).unwrap();

        assert_eq!(ctx.config.cluster.provider, "eks");
        assert_eq!(ctx.config.version_stream.url, "https://example.com/versions.git");
        assert_eq!(ctx.config.version_stream.git_ref, "v1.0.0");
        assert_eq!(ctx.dir, dir.path());
    }

    #[test]
    fn test_no_config_file() {
        let dir = TempDir::new().unwrap();

        let ctx = RunContext::load(dir.path(), &ConfigArgs::default()).unwrap();

        assert!(ctx.config.cluster.provider.is_empty());
        assert!(!ctx.catalog.is_open());
    }
}
