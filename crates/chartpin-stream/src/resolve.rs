//! Filling in missing dependency versions from a version stream
//!
//! Dependencies that already carry a version are left alone. Every other
//! dependency must name a repository the stream has a prefix for; its
//! version is the stream's pin for `<prefix>/<chart name>`. Any dependency
//! that cannot be resolved fails the whole run before anything is written.

use std::path::{Path, PathBuf};

use chartpin_core::{FileStore, REQUIREMENTS_FILE_NAME, RequirementsDocument};

use crate::catalog::CatalogClient;
use crate::error::{Result, StreamError};
use crate::kind::VersionKind;
use crate::prefixes::RepositoryPrefixes;

/// What [`persist_missing_versions`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The directory has no requirements file
    NoRequirementsFile { path: PathBuf },

    /// Every dependency was already pinned; nothing written
    Unchanged { path: PathBuf },

    /// Versions were filled in and the file rewritten
    Updated { path: PathBuf, resolved: usize },
}

/// Pin every unversioned dependency of `document`
///
/// Returns whether the document changed. On error the document is left
/// exactly as it was.
pub fn resolve_missing_versions(
    document: &mut RequirementsDocument,
    prefixes: &RepositoryPrefixes,
    catalog: &dyn CatalogClient,
) -> Result<bool> {
    let mut updates = Vec::new();

    for (index, dep) in document.dependencies.iter().enumerate() {
        if dep.pinned_version().is_some() {
            continue;
        }

        let name = dep.effective_name();
        let repository = dep
            .repository_url()
            .ok_or_else(|| StreamError::MissingRepository {
                dependency: name.to_string(),
            })?;

        let prefix = prefixes.prefix_for_url(repository).ok_or_else(|| {
            StreamError::NoPrefixForRepository {
                repository: repository.to_string(),
                dependency: name.to_string(),
            }
        })?;

        let chart = format!("{}/{}", prefix, dep.name);
        let version = catalog
            .stable_version(VersionKind::Chart, &chart)
            .map_err(|source| StreamError::Lookup {
                chart: chart.clone(),
                source: Box::new(source),
            })?
            .ok_or_else(|| StreamError::NoVersionFound {
                dependency: name.to_string(),
                chart: chart.clone(),
            })?;

        tracing::debug!("adding version {} to dependency {}", version, name);
        updates.push((index, version));
    }

    let modified = !updates.is_empty();
    for (index, version) in updates {
        document.dependencies[index].version = Some(version);
    }
    Ok(modified)
}

/// Pin the missing versions of the requirements file in `dir` and save it
/// if anything changed
pub fn persist_missing_versions(
    dir: &Path,
    catalog: &dyn CatalogClient,
    store: &dyn FileStore,
) -> Result<PersistOutcome> {
    let path = dir.join(REQUIREMENTS_FILE_NAME);
    if !store.exists(&path)? {
        tracing::info!(
            "no requirements file {} so not checking for missing versions",
            path.display()
        );
        return Ok(PersistOutcome::NoRequirementsFile { path });
    }

    tracing::info!("verifying the chart requirements versions in {}", dir.display());

    let mut document = RequirementsDocument::load(store, &path)
        .map_err(|e| StreamError::from(e).in_requirements(&path))?;
    let before = document.unpinned().count();
    if before == 0 {
        return Ok(PersistOutcome::Unchanged { path });
    }

    let prefixes = catalog
        .repository_prefixes()
        .map_err(|e| e.in_requirements(&path))?;

    let modified = resolve_missing_versions(&mut document, &prefixes, catalog)
        .map_err(|e| e.in_requirements(&path))?;
    if !modified {
        return Ok(PersistOutcome::Unchanged { path });
    }

    document
        .save(store, &path)
        .map_err(|e| StreamError::from(e).in_requirements(&path))?;
    tracing::debug!("added dependency versions to {}", path.display());

    Ok(PersistOutcome::Updated {
        path,
        resolved: before,
    })
}
