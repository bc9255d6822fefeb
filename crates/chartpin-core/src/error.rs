//! Core error types

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification shared by every chartpin error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-fixable data problem (missing repository, prefix, version, ...)
    Config,
    /// Existence check, read or write failure
    Io,
    /// Template parse or execution failure
    Render,
    /// Malformed structured document
    Parse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Io => "io",
            Self::Render => "render",
            Self::Parse => "parse",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("failed to check if file exists: {}", path.display())]
    Exists {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what}")]
    Parse {
        what: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize {what}")]
    Serialize {
        what: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{what} must be a mapping at the top level, found {found}")]
    NotAMapping { what: String, found: &'static str },

    #[error("Values merge error: {message}")]
    ValuesMerge { message: String },
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Exists { .. } | Self::Read { .. } | Self::Write { .. } => ErrorKind::Io,
            Self::Parse { .. } | Self::Serialize { .. } | Self::NotAMapping { .. } => {
                ErrorKind::Parse
            }
            Self::ValuesMerge { .. } => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
