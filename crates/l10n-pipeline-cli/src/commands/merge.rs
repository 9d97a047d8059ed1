//! Merge command: writes translated copies of the raw game scripts.

use crate::commands::{ConfigArgs, MergeModeArgs};
use crate::core::{CliError, MergeFailureReport};
use crate::utils::ui;
use clap::Parser;
use l10n_pipeline::PipelineConfig;
use l10n_pipeline::merge::{MergeReport, plan_merge, run_merge_job};
use l10n_pipeline::pipeline::copy_localization_catalogue;

/// Arguments for the merge command.
#[derive(Debug, Parser)]
pub struct MergeArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub mode: MergeModeArgs,
}

/// Run the merge command.
pub fn run_merge(args: MergeArgs) -> Result<(), CliError> {
    let config = args.config.load()?;
    let report = merge_scripts(&config, &args.mode)?;

    match MergeFailureReport::from_report(&report) {
        Some(failures) => Err(failures.into()),
        None => Ok(()),
    }
}

/// Merges every translated script and copies the localization catalogue.
///
/// Scripts that fail are reported, not returned as an error, so callers can
/// carry on with other phases.
pub(crate) fn merge_scripts(
    config: &PipelineConfig,
    mode: &MergeModeArgs,
) -> Result<MergeReport, CliError> {
    ui::print_merge_header();

    let plan = plan_merge(config)?;
    ui::print_merge_plan(plan.jobs.len(), plan.skipped.len());

    let merger = mode.merger();
    let mut report = MergeReport::for_plan(&plan);

    let pb = ui::create_progress_bar(plan.jobs.len() as u64, "Merging scripts...");
    for job in &plan.jobs {
        pb.set_message(format!("Merging {}", job.file_name));
        let result = run_merge_job(job, merger.as_ref());

        pb.suspend(|| {
            if result.is_ok() {
                ui::print_merged(job);
            }
            report.record(job, result);
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    ui::print_merge_summary(&report);

    match copy_localization_catalogue(config)? {
        Some(target) => ui::print_catalogue_copied(&target),
        None => ui::print_catalogue_missing(&config.localization_source()),
    }

    Ok(report)
}
