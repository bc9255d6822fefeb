//! Engine error types

use chartpin_core::{CoreError, ErrorKind};
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

use crate::suggestions::suggest_for_line;

/// Main engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to render {}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    #[error("failed to load provider specific value overrides {}", path.display())]
    Overrides {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    #[error("failed to parse the base chart values {}", path.display())]
    BaseValues {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Render { .. } | Self::Template(_) => ErrorKind::Render,
            Self::Overrides { source, .. }
            | Self::BaseValues { source, .. }
            | Self::Core(source) => source.kind(),
        }
    }

    /// The template diagnostic, if this is a render failure
    pub fn template_error(&self) -> Option<&TemplateError> {
        match self {
            Self::Render { source, .. } | Self::Template(source) => Some(source),
            _ => None,
        }
    }
}

/// Error kind for categorizing template errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TemplateErrorKind {
    UndefinedVariable,
    UnknownFilter,
    UnknownFunction,
    SyntaxError,
    TypeError,
    InvalidOperation,
    Other,
}

/// Template-specific error with source information
#[derive(Error, Debug, Diagnostic, Clone)]
#[error("{message}")]
#[diagnostic(code(chartpin::template::render))]
pub struct TemplateError {
    /// Error message
    pub message: String,

    /// Error kind for categorization
    pub kind: TemplateErrorKind,

    /// Template source code
    #[source_code]
    pub src: NamedSource<String>,

    /// Error location in source
    #[label("error occurred here")]
    pub span: Option<SourceSpan>,

    /// Suggestion for fixing the error
    #[help]
    pub suggestion: Option<String>,
}

impl TemplateError {
    /// Create a new template error from a MiniJinja error
    pub fn from_minijinja(
        err: minijinja::Error,
        template_name: &str,
        template_source: &str,
    ) -> Self {
        let kind = categorize(&err);
        let line = err
            .line()
            .and_then(|n| template_source.lines().nth(n.saturating_sub(1)).map(|l| (n, l)));

        let span = line.and_then(|(n, _)| calculate_span(template_source, n));
        let suggestion = match (kind, line) {
            (TemplateErrorKind::UnknownFunction, Some((_, text))) => suggest_for_line(text, false),
            (TemplateErrorKind::UnknownFilter, Some((_, text))) => suggest_for_line(text, true),
            (TemplateErrorKind::UndefinedVariable, _) => Some(
                "Base chart values are available as `values`, the pipeline configuration as \
                 `requirements`."
                    .to_string(),
            ),
            _ => None,
        };

        let message = match err.detail() {
            Some(detail) => format!("{}: {}", kind_label(kind), detail),
            None => err.to_string(),
        };

        Self {
            message,
            kind,
            src: NamedSource::new(template_name, template_source.to_string()),
            span,
            suggestion,
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> TemplateErrorKind {
        self.kind
    }
}

fn categorize(err: &minijinja::Error) -> TemplateErrorKind {
    match err.kind() {
        minijinja::ErrorKind::UndefinedError => TemplateErrorKind::UndefinedVariable,
        minijinja::ErrorKind::UnknownFilter => TemplateErrorKind::UnknownFilter,
        minijinja::ErrorKind::UnknownFunction => TemplateErrorKind::UnknownFunction,
        minijinja::ErrorKind::SyntaxError => TemplateErrorKind::SyntaxError,
        minijinja::ErrorKind::InvalidOperation => TemplateErrorKind::InvalidOperation,
        minijinja::ErrorKind::NonPrimitive | minijinja::ErrorKind::NonKey => {
            TemplateErrorKind::TypeError
        }
        _ => TemplateErrorKind::Other,
    }
}

fn kind_label(kind: TemplateErrorKind) -> &'static str {
    match kind {
        TemplateErrorKind::UndefinedVariable => "undefined variable",
        TemplateErrorKind::UnknownFilter => "unknown filter",
        TemplateErrorKind::UnknownFunction => "unknown function",
        TemplateErrorKind::SyntaxError => "syntax error",
        TemplateErrorKind::TypeError => "type error",
        TemplateErrorKind::InvalidOperation => "invalid operation",
        TemplateErrorKind::Other => "render error",
    }
}

/// Calculate source span from line number
fn calculate_span(source: &str, line_num: usize) -> Option<SourceSpan> {
    let mut offset = 0;

    for (index, line) in source.lines().enumerate() {
        if index + 1 == line_num {
            return Some(SourceSpan::new(offset.into(), line.len()));
        }
        offset += line.len() + 1;
    }

    None
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_span() {
        let source = "a: 1\nbb: {{ x }}\nc: 3";

        let span = calculate_span(source, 2).unwrap();

        assert_eq!(span.offset(), 5);
        assert_eq!(span.len(), 11);
        assert!(calculate_span(source, 9).is_none());
    }

    #[test]
    fn test_engine_error_kinds() {
        let err = EngineError::BaseValues {
            path: PathBuf::from("chart/values.yaml"),
            source: CoreError::ValuesMerge {
                message: "x".to_string(),
            },
        };
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.template_error().is_none());
        assert!(err.to_string().contains("chart/values.yaml"));
    }
}
