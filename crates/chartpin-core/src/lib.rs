//! chartpin Core - shared types for version pinning and value overrides
//!
//! This crate provides the foundational types used throughout chartpin:
//! - `RequirementsDocument`: a chart's `requirements.yaml`
//! - `Values`: chart values with deep merge support
//! - `PipelineConfig`: cluster provider and version stream settings
//! - `FileStore`: whole-file access used by the pipelines
//! - `namespace_overrides`: namespace-scoped value pairs

pub mod config;
pub mod error;
pub mod files;
pub mod fs;
pub mod namespace;
pub mod requirements;
pub mod values;

pub use config::{
    CONFIG_FILE_NAME, ClusterConfig, PipelineConfig, VersionStreamConfig,
};
pub use error::{CoreError, ErrorKind, Result};
pub use files::{VALUES_FILE_NAME, VALUES_FILE_NAMES, discover_values_files};
pub use fs::{FileStore, LocalFileStore};
pub use namespace::{NamespaceOverrides, namespace_overrides, to_camel_case};
pub use requirements::{Dependency, REQUIREMENTS_FILE_NAME, RequirementsDocument};
pub use values::{Values, parse_set_values};
