use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("failed to parse configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Failure of a single script merge. The whole file is abandoned.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed translation CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("translation CSV is missing the '{0}' column")]
    MissingColumn(&'static str),

    #[error("line {line}: script text {found:?} does not match CSV text {expected:?}")]
    TextMismatch {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("line {line}: translation {text:?} would break the script command")]
    UnsafeTranslation { line: usize, text: String },

    #[error("CSV has {rows} translation row(s) but the script has {slots} text slot(s)")]
    SlotCountMismatch { rows: usize, slots: usize },

    #[error(
        "translation has {translated} line(s) but the original has {original} line(s): {text:?}"
    )]
    LineCountMismatch {
        original: usize,
        translated: usize,
        text: String,
    },
}
