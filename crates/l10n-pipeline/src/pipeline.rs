//! Runs the reshape phases over both categories and writes the manifest.

use crate::category::Category;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::manifest::{DisplayNames, ManifestEntry, write_manifest};
use crate::prune::{PruneReport, prune_empty_locales};
use crate::reshape::{CategoryReport, process_category};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// File name of the copied localization catalogue.
pub const LOCALIZATION_FILE_NAME: &str = "localization.json";

/// Outcome of [`run_reshape`].
#[derive(Clone, Debug)]
pub struct ReshapeReport {
    pub categories: Vec<CategoryReport>,
    pub prune: PruneReport,
    pub manifest: Vec<ManifestEntry>,
    pub manifest_path: PathBuf,
}

impl ReshapeReport {
    /// Locales that survived pruning, sorted.
    pub fn locales(&self) -> &BTreeSet<String> {
        &self.prune.kept
    }
}

/// Reshapes every category into `output_dir`, prunes locale folders left
/// without content and writes the manifest of the remaining locales.
///
/// Only locales with translations in some category are pruning candidates.
/// Locales that produced nothing already lost their folder while reshaping.
pub fn run_reshape(config: &PipelineConfig) -> Result<ReshapeReport, PipelineError> {
    fs_err::create_dir_all(&config.output_dir)?;

    let mut categories = Vec::new();
    let mut candidates = BTreeSet::new();

    for category in Category::all() {
        let report = process_category(config.source_dir(category), &config.output_dir, category)?;
        candidates.extend(report.valid.iter().cloned());
        categories.push(report);
    }

    let prune = prune_empty_locales(&config.output_dir, &candidates);

    let display_names = DisplayNames::default().with_overrides(&config.display_names);
    let manifest_path = config.manifest_path();
    let manifest = write_manifest(&prune.kept, &display_names, &manifest_path)?;

    tracing::info!(
        "Wrote manifest with {} locale(s) to {}",
        manifest.len(),
        manifest_path.display()
    );

    Ok(ReshapeReport {
        categories,
        prune,
        manifest,
        manifest_path,
    })
}

/// Copies the localization catalogue into `output_dir`.
///
/// Returns the written path, or `None` when the catalogue does not exist.
pub fn copy_localization_catalogue(
    config: &PipelineConfig,
) -> Result<Option<PathBuf>, PipelineError> {
    let source = config.localization_source();
    if !source.is_file() {
        tracing::warn!("Localization catalogue not found: {}", source.display());
        return Ok(None);
    }

    fs_err::create_dir_all(&config.output_dir)?;
    let target = config.output_dir.join(LOCALIZATION_FILE_NAME);
    fs_err::copy(&source, &target)?;

    Ok(Some(target))
}
