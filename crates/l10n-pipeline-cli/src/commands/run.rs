use crate::commands::merge::merge_scripts;
use crate::commands::reshape::reshape_locales;
use crate::commands::{ConfigArgs, MergeModeArgs};
use crate::core::{CliError, MergeFailureReport};
use clap::Parser;

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub mode: MergeModeArgs,

    /// Only reshape locales.
    #[arg(long)]
    pub skip_merge: bool,
}

/// Run the merge and reshape phases in order. Failed scripts do not stop
/// the reshape; they are reported once it is done.
pub fn run_pipeline(args: RunArgs) -> Result<(), CliError> {
    let config = args.config.load()?;

    let merge_report = if args.skip_merge {
        None
    } else {
        Some(merge_scripts(&config, &args.mode)?)
    };

    reshape_locales(&config)?;

    match merge_report.as_ref().and_then(MergeFailureReport::from_report) {
        Some(failures) => Err(failures.into()),
        None => Ok(()),
    }
}
