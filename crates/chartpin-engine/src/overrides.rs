//! Provider specific value overrides
//!
//! A chart may ship `{overrides_root}/{provider}/values.tmpl.yaml`. It is
//! rendered against the chart's base values and the pipeline configuration,
//! and the result is deep-merged over the base values.

use std::path::Path;
use std::sync::Arc;

use chartpin_core::{FileStore, PipelineConfig, Values};
use chartpin_stream::CatalogClient;

use crate::engine::{Engine, RenderParams};
use crate::error::{EngineError, Result};
use crate::registry::FunctionRegistry;

/// File name of a provider override template
pub const OVERRIDES_TEMPLATE_NAME: &str = "values.tmpl.yaml";

/// Default directory holding one subdirectory per provider
pub const DEFAULT_PROVIDERS_DIR: &str = "providers";

/// Render the provider override template and merge it over `base_values`
///
/// `base_path` names the file `base_values` was read from in errors.
/// Returns `base_values` untouched when no provider is configured, when the
/// provider has no template, or when the template renders no values.
pub fn apply_provider_overrides(
    config: &PipelineConfig,
    base_values: &str,
    base_path: &Path,
    overrides_root: &Path,
    catalog: Arc<dyn CatalogClient>,
    store: &dyn FileStore,
) -> Result<String> {
    let provider = config.cluster.provider.as_str();
    if provider.is_empty() {
        tracing::warn!("no provider configured, skipping provider specific value overrides");
        return Ok(base_values.to_string());
    }

    let template_path = overrides_root.join(provider).join(OVERRIDES_TEMPLATE_NAME);
    let overrides_error = |source| EngineError::Overrides {
        path: template_path.clone(),
        source,
    };

    if !store.exists(&template_path).map_err(overrides_error)? {
        tracing::warn!(
            "no provider specific values overrides exist in {}",
            template_path.display()
        );
        return Ok(base_values.to_string());
    }
    let source = store.load_string(&template_path).map_err(overrides_error)?;

    let base = Values::parse(base_values, &base_path.display().to_string()).map_err(|source| {
        EngineError::BaseValues {
            path: base_path.to_path_buf(),
            source,
        }
    })?;
    let params = RenderParams {
        values: base.inner().clone(),
        requirements: config.clone(),
        provider: provider.to_string(),
    };
    let registry = FunctionRegistry::new(catalog);

    let name = template_path.display().to_string();
    let rendered = Engine::default()
        .render_str(&source, &name, &params, &registry)
        .map_err(|e| match e {
            EngineError::Template(source) => EngineError::Render {
                path: template_path.clone(),
                source,
            },
            other => other,
        })?;

    if rendered.trim().is_empty() {
        tracing::debug!("{} rendered no overrides", name);
        return Ok(base_values.to_string());
    }

    let overlay = Values::parse(&rendered, &name).map_err(overrides_error)?;
    if overlay.is_empty() {
        tracing::debug!("{} rendered no overrides", name);
        return Ok(base_values.to_string());
    }
    tracing::info!("applying {} provider overrides from {}", provider, name);

    Ok(base.merged(&overlay).to_yaml()?)
}
