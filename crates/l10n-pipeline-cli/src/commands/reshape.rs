//! Reshape command: rebuilds the per-locale tree and the manifest.

use crate::commands::ConfigArgs;
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;
use l10n_pipeline::{PipelineConfig, pipeline};

/// Arguments for the reshape command.
#[derive(Debug, Parser)]
pub struct ReshapeArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Run the reshape command.
pub fn run_reshape(args: ReshapeArgs) -> Result<(), CliError> {
    let config = args.config.load()?;
    reshape_locales(&config)
}

pub(crate) fn reshape_locales(config: &PipelineConfig) -> Result<(), CliError> {
    ui::print_reshape_header();

    let report = pipeline::run_reshape(config)?;

    for category in &report.categories {
        ui::print_category(category);
    }
    ui::print_pruned(&report.prune.removed);
    ui::print_manifest(&report.manifest, &report.manifest_path);
    ui::print_output_tree(&config.output_dir, report.locales());

    Ok(())
}
