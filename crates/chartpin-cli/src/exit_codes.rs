//! Process exit codes

/// Unclassified failure
pub const ERROR: i32 = 1;

/// Bad configuration: missing repository, prefix, pin or stream URL
pub const CONFIG_ERROR: i32 = 2;

/// Override template failed to render
pub const RENDER_ERROR: i32 = 3;

/// Malformed YAML document
pub const PARSE_ERROR: i32 = 4;

/// File not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;
