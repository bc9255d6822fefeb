//! Overrides command - merge provider value overrides over the chart values

use std::path::{Path, PathBuf};

use chartpin_core::{FileStore, LocalFileStore, VALUES_FILE_NAME};
use chartpin_engine::{DEFAULT_PROVIDERS_DIR, apply_provider_overrides};
use console::style;

use crate::context::RunContext;
use crate::error::Result;

/// Where the overrides command reads and writes
#[derive(Debug, Clone, Default)]
pub struct OverridesPaths {
    /// Base values file, `values.yaml` in the chart directory by default
    pub values: Option<PathBuf>,
    /// Directory holding `<provider>/values.tmpl.yaml`
    pub providers_dir: Option<PathBuf>,
    /// Write the merged values here instead of stdout
    pub output: Option<PathBuf>,
}

pub fn run(ctx: &RunContext, paths: &OverridesPaths) -> Result<()> {
    let store = LocalFileStore;

    let (base_path, base) = load_base_values(ctx, paths.values.as_deref(), &store)?;
    let providers_dir = paths
        .providers_dir
        .clone()
        .unwrap_or_else(|| ctx.dir.join(DEFAULT_PROVIDERS_DIR));

    let merged = apply_provider_overrides(
        &ctx.config,
        &base,
        &base_path,
        &providers_dir,
        ctx.catalog(),
        &store,
    )?;

    match &paths.output {
        Some(output) => {
            store.save(output, merged.as_bytes())?;
            eprintln!(
                "{} Wrote values to {}",
                style("✓").green().bold(),
                style(output.display()).cyan()
            );
        }
        None => print!("{}", merged),
    }
    Ok(())
}

/// The base values file and its text; a chart without a default values file has none
fn load_base_values(
    ctx: &RunContext,
    explicit: Option<&Path>,
    store: &dyn FileStore,
) -> Result<(PathBuf, String)> {
    if let Some(path) = explicit {
        let content = store.load_string(path)?;
        return Ok((path.to_path_buf(), content));
    }

    let path = ctx.dir.join(VALUES_FILE_NAME);
    if store.exists(&path)? {
        let content = store.load_string(&path)?;
        Ok((path, content))
    } else {
        tracing::debug!("no {} found, starting from empty values", path.display());
        Ok((path, String::new()))
    }
}
