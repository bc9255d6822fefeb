//! Error types for version stream operations

use chartpin_core::{CoreError, ErrorKind};
use std::path::PathBuf;
use thiserror::Error;

/// Version stream and version resolution errors
#[derive(Debug, Error)]
pub enum StreamError {
    // ============ Source Errors ============
    #[error("no version stream URL configured")]
    MissingSource,

    #[error("failed to check out version stream {url} at {git_ref}: {message}")]
    Checkout {
        url: String,
        git_ref: String,
        message: String,
    },

    #[error("could not determine a cache directory for version streams")]
    NoCacheDir,

    #[error("failed to run git")]
    Git(#[source] std::io::Error),

    // ============ Catalog Errors ============
    #[error("unknown version kind '{kind}' (expected one of: chart, package, docker, git)")]
    UnknownKind { kind: String },

    #[error("invalid version stream name '{name}'")]
    InvalidName { name: String },

    #[error("failed to load repository prefixes from {}", path.display())]
    Prefixes {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    #[error("failed to load pinned version from {}", path.display())]
    Pin {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    // ============ Resolution Errors ============
    #[error(
        "cannot find a version for dependency {dependency} as there is no 'repository'"
    )]
    MissingRepository { dependency: String },

    #[error(
        "the chart repository {repository} (dependency {dependency}) has no prefix in the \
         version stream's repository list, so its version cannot be defaulted"
    )]
    NoPrefixForRepository {
        repository: String,
        dependency: String,
    },

    #[error("failed to find version of chart {chart}")]
    Lookup {
        chart: String,
        #[source]
        source: Box<StreamError>,
    },

    #[error(
        "no version for dependency {dependency} in the version stream - either pin a version \
         explicitly or add chart {chart} to the version stream"
    )]
    NoVersionFound { dependency: String, chart: String },

    // ============ Wrapping ============
    #[error("failed to replace missing versions in {}", path.display())]
    Requirements {
        path: PathBuf,
        #[source]
        source: Box<StreamError>,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StreamError {
    /// Classify the error, looking through wrapping variants
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingSource
            | Self::UnknownKind { .. }
            | Self::InvalidName { .. }
            | Self::MissingRepository { .. }
            | Self::NoPrefixForRepository { .. }
            | Self::NoVersionFound { .. } => ErrorKind::Config,
            Self::Checkout { .. } | Self::NoCacheDir | Self::Git(_) => ErrorKind::Io,
            Self::Prefixes { source, .. } | Self::Pin { source, .. } => source.kind(),
            Self::Lookup { source, .. } | Self::Requirements { source, .. } => source.kind(),
            Self::Core(e) => e.kind(),
        }
    }

    /// Wrap with the requirements file the error happened in
    pub fn in_requirements(self, path: impl Into<PathBuf>) -> Self {
        Self::Requirements {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Result type for version stream operations
pub type Result<T> = std::result::Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_looks_through_wrappers() {
        let err = StreamError::MissingRepository {
            dependency: "nginx".to_string(),
        }
        .in_requirements("/charts/app/requirements.yaml");

        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("/charts/app/requirements.yaml"));
    }

    #[test]
    fn test_lookup_keeps_cause() {
        let err = StreamError::Lookup {
            chart: "stable/nginx".to_string(),
            source: Box::new(StreamError::Git(std::io::Error::other("boom"))),
        };

        assert_eq!(err.kind(), ErrorKind::Io);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "failed to run git");
    }
}
