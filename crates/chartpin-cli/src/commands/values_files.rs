//! Values-files command - list the values files of a chart

use std::path::Path;

use chartpin_core::{LocalFileStore, discover_values_files};

use crate::error::Result;

pub fn run(dir: &Path) -> Result<()> {
    let files = discover_values_files(&LocalFileStore, dir)?;
    if files.is_empty() {
        tracing::info!("no values files in {}", dir.display());
    }

    for file in files {
        println!("{}", file.display());
    }
    Ok(())
}
