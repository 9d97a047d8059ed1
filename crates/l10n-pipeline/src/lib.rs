#![doc = include_str!("../README.md")]

pub mod category;
pub mod config;
pub mod error;
mod files;
pub mod manifest;
pub mod merge;
pub mod pipeline;
pub mod prune;
pub mod record;
pub mod reshape;

pub use category::Category;
pub use config::{CONFIG_FILE_NAME, PipelineConfig};
pub use error::{MergeError, PipelineError};
pub use merge::{
    DualLanguageMerger, LineMerger, MergeReport, ReplaceMerger, merge_translated_csv_into_txt,
    merge_translation_files,
};
pub use pipeline::{ReshapeReport, copy_localization_catalogue, run_reshape};
