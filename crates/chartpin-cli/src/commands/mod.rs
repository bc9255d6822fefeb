//! CLI commands

pub mod namespace;
pub mod overrides;
pub mod prepare;
pub mod values_files;
pub mod versions;
