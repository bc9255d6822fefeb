//! Versions command - pin missing dependency versions

use chartpin_core::LocalFileStore;
use chartpin_stream::{PersistOutcome, persist_missing_versions};
use console::style;

use crate::context::RunContext;
use crate::error::Result;

pub fn run(ctx: &RunContext) -> Result<()> {
    let catalog = ctx.catalog();
    let outcome = persist_missing_versions(&ctx.dir, catalog.as_ref(), &LocalFileStore)?;
    report(&outcome);
    Ok(())
}

fn report(outcome: &PersistOutcome) {
    match outcome {
        PersistOutcome::NoRequirementsFile { path } => {
            eprintln!(
                "{} No {} found, nothing to pin",
                style("-").dim(),
                path.display()
            );
        }
        PersistOutcome::Unchanged { path } => {
            eprintln!(
                "{} All dependencies in {} are pinned",
                style("✓").green(),
                path.display()
            );
        }
        PersistOutcome::Updated { path, resolved } => {
            eprintln!(
                "{} Pinned {} dependency version(s) in {}",
                style("✓").green().bold(),
                resolved,
                style(path.display()).cyan()
            );
        }
    }
}
