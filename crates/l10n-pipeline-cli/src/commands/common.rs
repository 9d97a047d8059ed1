use crate::core::{CliError, ConfigNotFoundError, ConfigParseError};
use crate::utils::ui;
use clap::Args;
use l10n_pipeline::{DualLanguageMerger, LineMerger, PipelineConfig, PipelineError, ReplaceMerger};
use miette::{NamedSource, SourceSpan};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Path to the configuration file (defaults to l10n.toml in the current directory).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// Loads the configuration, falling back to the default layout relative
    /// to the current directory.
    pub fn load(&self) -> Result<PipelineConfig, CliError> {
        let cwd = std::env::current_dir()?;
        let path = PipelineConfig::locate(self.config.as_deref(), &cwd);
        ui::print_config_source(path.as_deref());

        PipelineConfig::discover(path.as_deref(), &cwd)
            .map_err(|error| config_error(error, path.as_deref()))
    }
}

fn config_error(error: PipelineError, path: Option<&Path>) -> CliError {
    match (error, path) {
        (PipelineError::ConfigNotFound(expected_path), _) => {
            ConfigNotFoundError { expected_path }.into()
        },
        (PipelineError::ConfigParse(error), Some(path)) => {
            let content = fs_err::read_to_string(path).unwrap_or_default();
            ConfigParseError {
                src: NamedSource::new(path.display().to_string(), content),
                span: error.span().map(SourceSpan::from),
                help: error.message().to_string(),
            }
            .into()
        },
        (error, _) => error.into(),
    }
}

/// Options shared by the commands that merge scripts.
#[derive(Debug, Clone, Args)]
pub struct MergeModeArgs {
    /// Keep each original line under its translated line.
    #[arg(long)]
    pub dual: bool,
}

impl MergeModeArgs {
    pub fn merger(&self) -> Box<dyn LineMerger> {
        if self.dual {
            Box::new(DualLanguageMerger)
        } else {
            Box::new(ReplaceMerger)
        }
    }
}
