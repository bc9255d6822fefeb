//! CLI error type with exit code handling

use chartpin_core::{CoreError, ErrorKind};
use chartpin_engine::{EngineError, TemplateError};
use chartpin_stream::StreamError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Configuration, stream or requirements problem
    #[error("{message}")]
    #[diagnostic(code(chartpin::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Template failure, rendered with its source span
    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(TemplateError),

    #[error("{message}")]
    #[diagnostic(code(chartpin::cli::parse))]
    Parse { message: String },

    #[error("{message}")]
    #[diagnostic(code(chartpin::cli::io))]
    Io { message: String },

    #[error("{message}")]
    #[diagnostic(code(chartpin::cli::error))]
    Other { message: String },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Template(_) => exit_codes::RENDER_ERROR,
            CliError::Parse { .. } => exit_codes::PARSE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    /// Classify `err` by `kind`, keeping its whole cause chain in the message
    fn classify(kind: ErrorKind, err: &(dyn std::error::Error + 'static)) -> Self {
        let message = chain(err);
        match kind {
            ErrorKind::Config => Self::Config {
                message,
                help: None,
            },
            ErrorKind::Parse => Self::Parse { message },
            ErrorKind::Io => Self::Io { message },
            ErrorKind::Render => Self::Other { message },
        }
    }
}

/// `outer: cause: root cause`
fn chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::classify(err.kind(), &err)
    }
}

impl From<StreamError> for CliError {
    fn from(err: StreamError) -> Self {
        let mut cli = Self::classify(err.kind(), &err);
        if let CliError::Config { help, .. } = &mut cli {
            *help = stream_help(&err);
        }
        cli
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        match err.template_error() {
            Some(template) => Self::Template(template.clone()),
            None => Self::classify(err.kind(), &err),
        }
    }
}

fn stream_help(err: &StreamError) -> Option<String> {
    match err {
        StreamError::MissingSource => Some(
            "Set versionStream.url in chartpin.yml or pass --version-stream-url".to_string(),
        ),
        StreamError::Requirements { source, .. } => stream_help(source),
        StreamError::NoPrefixForRepository { .. } => Some(
            "Add the repository to charts/repositories.yml in the version stream, \
             or pin the version in requirements.yaml"
                .to_string(),
        ),
        _ => None,
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes_follow_kind() {
        let err: CliError = StreamError::MissingSource.into();
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
        assert!(matches!(err, CliError::Config { help: Some(_), .. }));

        let err: CliError = CoreError::Read {
            path: PathBuf::from("values.yaml"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::IO_ERROR);
        assert!(err.to_string().starts_with("failed to read values.yaml: "));
    }

    #[test]
    fn test_requirements_context_keeps_help() {
        let err = StreamError::MissingSource.in_requirements(std::path::Path::new("requirements.yaml"));
        let cli: CliError = err.into();

        match cli {
            CliError::Config { message, help } => {
                assert!(message.contains("requirements.yaml"));
                assert!(help.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
