//! CLI error types rendered as miette diagnostics.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use l10n_pipeline::PipelineError;
use l10n_pipeline::merge::MergeReport;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Error when an explicitly requested configuration file does not exist.
#[derive(Debug, Diagnostic, Error)]
#[error("configuration file not found: {}", .expected_path.display())]
#[diagnostic(
    code(l10n_pipeline::config::not_found),
    help(
        "Create the file, or drop --config to use l10n.toml from the working directory:\n\n  \
          raw_dir = \"./raw\"\n  \
          output_dir = \"./local-files\"\n"
    )
)]
pub struct ConfigNotFoundError {
    /// The path where the config was expected.
    pub expected_path: PathBuf,
}

/// Error when parsing the l10n.toml configuration file.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse l10n.toml configuration")]
#[diagnostic(code(l10n_pipeline::config::parse_error))]
pub struct ConfigParseError {
    #[source_code]
    pub src: NamedSource<String>,

    #[label("error occurred here")]
    pub span: Option<SourceSpan>,

    /// The underlying parse error message.
    #[help]
    pub help: String,
}

/// A script whose merge was abandoned.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to merge {file_name}")]
#[diagnostic(code(l10n_pipeline::merge::failed))]
pub struct ScriptMergeError {
    pub file_name: String,

    /// Where the merged script would have been written.
    pub target: PathBuf,

    #[help]
    pub help: String,
}

/// Report for merge runs where some scripts failed.
#[derive(Debug, Diagnostic, Error)]
#[error("merged {merged_count} script(s), {failed_count} failed")]
#[diagnostic(
    code(l10n_pipeline::merge::report),
    help("Failed scripts were not written; fix their CSVs and run merge again")
)]
pub struct MergeFailureReport {
    pub merged_count: usize,

    pub failed_count: usize,

    #[related]
    pub failures: Vec<ScriptMergeError>,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigNotFound(#[from] ConfigNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigParse(#[from] ConfigParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MergeFailed(#[from] MergeFailureReport),

    #[error(transparent)]
    #[diagnostic(code(l10n_pipeline::pipeline))]
    Pipeline(#[from] PipelineError),

    #[error("IO error: {0}")]
    #[diagnostic(code(l10n_pipeline::io))]
    Io(#[from] std::io::Error),
}

impl MergeFailureReport {
    /// The failures of `report`, or `None` when every script merged.
    pub fn from_report(report: &MergeReport) -> Option<Self> {
        if report.failed.is_empty() {
            return None;
        }

        Some(Self {
            merged_count: report.merged.len(),
            failed_count: report.failed.len(),
            failures: report
                .failed
                .iter()
                .map(|failure| ScriptMergeError {
                    file_name: failure.file_name.clone(),
                    target: failure.target.clone(),
                    help: failure.message.clone(),
                })
                .collect(),
        })
    }
}
