//! chartpin Version Streams
//!
//! A version stream is a git repository of pinned component versions:
//!
//! ```text
//! charts/repositories.yml      repository URL -> prefix
//! charts/<prefix>/<chart>.yml  version: 1.2.3
//! packages/<name>.yml
//! docker/<image>.yml
//! git/<repo>.yml
//! ```
//!
//! This crate reads such a stream and uses it to fill in the versions a
//! chart's `requirements.yaml` leaves out.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chartpin_core::LocalFileStore;
//! use chartpin_stream::{LazyCatalog, VersionStreamSource, persist_missing_versions};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = LazyCatalog::new(VersionStreamSource::new(
//!     "https://github.com/example/versions.git",
//!     "master",
//! ));
//! persist_missing_versions(Path::new("charts/app"), &catalog, &LocalFileStore)?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod kind;
pub mod lazy;
pub mod prefixes;
pub mod resolve;
pub mod source;

// Re-exports for convenience
pub use catalog::{CatalogClient, StaticCatalog, VersionStream};
pub use error::{Result, StreamError};
pub use kind::VersionKind;
pub use lazy::LazyCatalog;
pub use prefixes::{RepositoryPrefix, RepositoryPrefixes};
pub use resolve::{PersistOutcome, persist_missing_versions, resolve_missing_versions};
pub use source::VersionStreamSource;
