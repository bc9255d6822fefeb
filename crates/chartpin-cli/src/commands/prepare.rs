//! Prepare command - pin versions, then apply provider overrides
//!
//! Both steps share the run's catalog, so the version stream is checked out
//! at most once.

use crate::commands::overrides::{self, OverridesPaths};
use crate::commands::versions;
use crate::context::RunContext;
use crate::error::Result;

pub fn run(ctx: &RunContext, paths: &OverridesPaths) -> Result<()> {
    versions::run(ctx)?;
    overrides::run(ctx, paths)
}
