use clap::{Parser, Subcommand};
use l10n_pipeline_cli::commands::{
    LocalesArgs, MergeArgs, ReshapeArgs, RunArgs, run_locales, run_merge, run_pipeline, run_reshape,
};
use l10n_pipeline_cli::utils::ui;
use miette::Result as MietteResult;

#[derive(Parser)]
#[command(name = "l10n-pipeline")]
#[command(about = "Reshape locale trees and merge translated game scripts")]
#[command(version)]
struct Cli {
    /// Deterministic output for tests: no colors, no progress bars.
    #[arg(long, global = true, hide = true)]
    e2e: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reshape translation records into per-locale folders and write i18n.json
    Reshape(ReshapeArgs),

    /// Merge translated CSVs into the raw game scripts
    Merge(MergeArgs),

    /// Merge scripts, then reshape locales
    Run(RunArgs),

    /// List the locales found in the translation records
    Locales(LocalesArgs),
}

fn main() -> MietteResult<()> {
    let cli = Cli::parse();
    let e2e = cli.e2e;

    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(!e2e)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .color(!e2e)
                .build(),
        )
    }))
    .ok();

    ui::set_e2e_mode(e2e);
    ui::init_logging();

    let result = match cli.command {
        Commands::Reshape(args) => run_reshape(args),
        Commands::Merge(args) => run_merge(args),
        Commands::Run(args) => run_pipeline(args),
        Commands::Locales(args) => run_locales(args),
    };

    result.map_err(miette::Report::new)
}
