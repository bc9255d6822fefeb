//! chartpin Engine - provider value overrides
//!
//! Renders `providers/<provider>/values.tmpl.yaml` with MiniJinja and merges
//! the result over a chart's base values. Templates can look pinned
//! versions up with `versionStream(kind, name)`.

pub mod engine;
pub mod error;
pub mod filters;
pub mod functions;
pub mod overrides;
pub mod registry;
pub mod suggestions;

pub use engine::{Engine, RenderParams};
pub use error::{EngineError, Result, TemplateError, TemplateErrorKind};
pub use functions::VersionStreamFn;
pub use overrides::{DEFAULT_PROVIDERS_DIR, OVERRIDES_TEMPLATE_NAME, apply_provider_overrides};
pub use registry::FunctionRegistry;
pub use suggestions::{AVAILABLE_FILTERS, AVAILABLE_FUNCTIONS};
