use crate::commands::ConfigArgs;
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;
use l10n_pipeline::Category;
use l10n_pipeline::reshape::collect_available_locales;

/// Arguments for the locales command.
#[derive(Debug, Parser)]
pub struct LocalesArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// List the locales of each category without writing anything.
pub fn run_locales(args: LocalesArgs) -> Result<(), CliError> {
    let config = args.config.load()?;

    ui::print_locales_header();
    for category in Category::all() {
        let source_dir = config.source_dir(category);
        let locales = collect_available_locales(source_dir);
        ui::print_category_locales(category, source_dir, &locales);
    }

    Ok(())
}
