//! CLI command implementations.

mod common;
mod locales;
mod merge;
mod reshape;
mod run;

pub use common::{ConfigArgs, MergeModeArgs};
pub use locales::{LocalesArgs, run_locales};
pub use merge::{MergeArgs, run_merge};
pub use reshape::{ReshapeArgs, run_reshape};
pub use run::{RunArgs, run_pipeline};
