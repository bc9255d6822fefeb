//! Memoized catalog handle for one command run

use once_cell::sync::OnceCell;

use crate::catalog::{CatalogClient, VersionStream};
use crate::error::Result;
use crate::kind::VersionKind;
use crate::prefixes::RepositoryPrefixes;
use crate::source::VersionStreamSource;

/// Opens its [`VersionStreamSource`] on first use and reuses the stream
/// for every later lookup
///
/// Build one per command and pass it to everything that needs versions.
#[derive(Debug)]
pub struct LazyCatalog {
    source: VersionStreamSource,
    stream: OnceCell<VersionStream>,
}

impl LazyCatalog {
    pub fn new(source: VersionStreamSource) -> Self {
        Self {
            source,
            stream: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &VersionStreamSource {
        &self.source
    }

    /// Whether the stream has been opened yet
    pub fn is_open(&self) -> bool {
        self.stream.get().is_some()
    }

    /// The opened stream, opening it if needed
    pub fn stream(&self) -> Result<&VersionStream> {
        self.stream.get_or_try_init(|| {
            tracing::info!(
                "using version stream URL: {} and git ref: {}",
                self.source.url,
                self.source.git_ref
            );
            self.source.open()
        })
    }
}

impl CatalogClient for LazyCatalog {
    fn stable_version(&self, kind: VersionKind, name: &str) -> Result<Option<String>> {
        self.stream()?.stable_version(kind, name)
    }

    fn repository_prefixes(&self) -> Result<RepositoryPrefixes> {
        self.stream()?.repository_prefixes()
    }
}
