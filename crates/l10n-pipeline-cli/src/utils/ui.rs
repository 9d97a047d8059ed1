// CLI output formatting with consistent styling using indicatif and colored.
// The transcript goes to stdout; the tracing log goes to stderr.

use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use l10n_pipeline::Category;
use l10n_pipeline::manifest::ManifestEntry;
use l10n_pipeline::merge::{MergeJob, MergeReport};
use l10n_pipeline::reshape::CategoryReport;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PD_TICK: Duration = Duration::from_millis(100);

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "L10N_LOG";

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, hidden progress bars, untimed logs).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

/// Installs the stderr log subscriber. `L10N_LOG` takes an env-filter
/// directive and defaults to `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!is_e2e());

    // A subscriber may already be installed when embedded.
    let _ = if is_e2e() {
        builder.without_time().try_init()
    } else {
        builder.try_init()
    };
}

pub fn create_progress_bar(len: u64, msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");

    let pb = ProgressBar::new(len);
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

pub fn print_config_source(path: Option<&Path>) {
    match path {
        Some(path) => println!("{} {}", "Using".dimmed(), display_path(path).cyan()),
        None => println!("{}", "Using default paths".dimmed()),
    }
}

// Merge

pub fn print_merge_header() {
    println!("{}", "Script Merge".dimmed());
}

pub fn print_merge_plan(jobs: usize, skipped: usize) {
    println!(
        "{} {} {}",
        "Found".dimmed(),
        format!("{} translated script(s)", jobs).green(),
        format!("({} without translation)", skipped).dimmed()
    );
}

pub fn print_merged(job: &MergeJob) {
    println!(
        "{} {} {}",
        "Merged".dimmed(),
        job.file_name.green(),
        format!("({})", job.source).dimmed()
    );
}

pub fn print_merge_summary(report: &MergeReport) {
    let failed = report.failed.len();
    let failed = if failed == 0 {
        "0 failed".normal()
    } else {
        format!("{} failed", failed).red()
    };

    println!(
        "{} {} merged, {}, {} without translation",
        "Done:".green(),
        report.merged.len(),
        failed,
        report.skipped.len()
    );
}

pub fn print_catalogue_copied(target: &Path) {
    println!(
        "{} {}",
        "Copied localization catalogue to".dimmed(),
        display_path(target).cyan()
    );
}

pub fn print_catalogue_missing(source: &Path) {
    println!(
        "{} {}",
        "Localization catalogue not found:".yellow(),
        display_path(source)
    );
}

// Reshape

pub fn print_reshape_header() {
    println!("{}", "Locale Reshape".dimmed());
}

fn join_locales<'a>(locales: impl IntoIterator<Item = &'a String>) -> String {
    locales
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_category(report: &CategoryReport) {
    println!(
        "{} {} {}",
        report.category.to_string().white().bold(),
        "from".dimmed(),
        display_path(&report.source_dir).cyan()
    );

    if report.discovered.is_empty() {
        println!("  {}", "No locales found".yellow());
        return;
    }

    println!(
        "  {} {}",
        "Locales:".dimmed(),
        join_locales(&report.discovered)
    );

    for summary in &report.locales {
        if summary.removed {
            println!(
                "  {} {}",
                summary.locale.yellow(),
                "no translations, folder removed".dimmed()
            );
            continue;
        }

        println!(
            "  {} {}",
            summary.locale.green(),
            format!("{} translation(s)", summary.total).cyan()
        );
        for file in &summary.files {
            println!("    {} {}", file.file_name, file.count.to_string().dimmed());
        }
    }
}

pub fn print_pruned(removed: &[String]) {
    for locale in removed {
        println!("{} {}", "Removed empty locale".yellow(), locale);
    }
}

pub fn print_manifest(entries: &[ManifestEntry], path: &Path) {
    println!(
        "{} {} {}",
        "Wrote".dimmed(),
        display_path(path).cyan(),
        format!("({} locale(s))", entries.len()).dimmed()
    );
    for entry in entries {
        println!("  {} {}", entry.code.green(), entry.name);
    }
}

/// Prints the output layout of the surviving locales.
pub fn print_output_tree(output_dir: &Path, locales: &BTreeSet<String>) {
    if locales.is_empty() {
        println!("{}", "No locale produced any translation.".yellow());
        return;
    }

    println!(
        "{} {}",
        "Valid locales:".green(),
        join_locales(locales)
    );
    println!("{}", display_path(output_dir).cyan());
    for locale in locales {
        println!("  {}/", locale);
        for category in Category::all() {
            if output_dir.join(locale).join(category.dir_name()).is_dir() {
                println!("    {}/", category);
            }
        }
    }
}

// Locales

pub fn print_locales_header() {
    println!("{}", "Available Locales".dimmed());
}

pub fn print_category_locales(category: Category, source_dir: &Path, locales: &BTreeSet<String>) {
    println!(
        "{} {} {}",
        category.to_string().white().bold(),
        "from".dimmed(),
        display_path(source_dir).cyan()
    );
    if locales.is_empty() {
        println!("  {}", "No locales found".yellow());
    } else {
        for locale in locales {
            println!("  {}", locale.green());
        }
    }
}
