use crate::category::Category;
use crate::error::PipelineError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "l10n.toml";

/// Paths and options for one pipeline run.
///
/// Every field is optional in `l10n.toml`; missing fields take the layout of
/// the translation project checkout:
///
/// ```toml
/// raw_dir = "./raw"
/// output_dir = "./local-files"
///
/// [display_names]
/// zh-HK = "繁體中文（香港）"
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Raw game scripts (`adv_*.txt`).
    pub raw_dir: PathBuf,
    /// Human-adapted translations, with an `index.json`. Wins over pretranslation.
    pub translation_dir: PathBuf,
    /// Machine pretranslations, with an `index.json`.
    pub pretranslation_dir: PathBuf,
    /// Where merged scripts are written.
    pub resource_dir: PathBuf,
    /// Translation record files for [`Category::Generic`].
    pub generic_source_dir: PathBuf,
    /// Translation record files for [`Category::Master`].
    pub master_source_dir: PathBuf,
    /// Root of the per-locale output tree.
    pub output_dir: PathBuf,
    /// Defaults to `{output_dir}/i18n.json`.
    pub manifest_path: Option<PathBuf>,
    /// Defaults to `{pretranslation_dir}/etc/localization.json`.
    pub localization_source: Option<PathBuf>,
    /// Extra or overriding manifest display names, keyed by locale code.
    pub display_names: BTreeMap<String, String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("./raw"),
            translation_dir: PathBuf::from("./gakuen-adapted-translation-data"),
            pretranslation_dir: PathBuf::from("./GakumasPreTranslation"),
            resource_dir: PathBuf::from("./local-files/resource"),
            generic_source_dir: PathBuf::from("./linkura-generic-strings-translation/data"),
            master_source_dir: PathBuf::from("./linkura-master-translation/data"),
            output_dir: PathBuf::from("./local-files"),
            manifest_path: None,
            localization_source: None,
            display_names: BTreeMap::new(),
        }
    }
}

impl PipelineConfig {
    /// Reads the configuration from a path. Relative paths inside the file
    /// are resolved against the file's directory.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PipelineError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs_err::read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&content)?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(config.resolve_relative_to(base))
    }

    /// The configuration file [`PipelineConfig::discover`] reads: `explicit`
    /// if given, else `l10n.toml` in `cwd` when it exists.
    pub fn locate(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
        explicit.map(Path::to_path_buf).or_else(|| {
            let default_path = cwd.join(CONFIG_FILE_NAME);
            default_path.exists().then_some(default_path)
        })
    }

    /// Loads an explicitly requested config, or `l10n.toml` from `cwd` when it
    /// exists, or the defaults relative to `cwd`.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, PipelineError> {
        match Self::locate(explicit, cwd) {
            Some(path) => Self::read_from_path(path),
            None => Ok(Self::default().resolve_relative_to(cwd)),
        }
    }

    /// Rebases every relative path onto `base`.
    pub fn resolve_relative_to(mut self, base: &Path) -> Self {
        let rebase = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        rebase(&mut self.raw_dir);
        rebase(&mut self.translation_dir);
        rebase(&mut self.pretranslation_dir);
        rebase(&mut self.resource_dir);
        rebase(&mut self.generic_source_dir);
        rebase(&mut self.master_source_dir);
        rebase(&mut self.output_dir);
        if let Some(path) = self.manifest_path.as_mut() {
            rebase(path);
        }
        if let Some(path) = self.localization_source.as_mut() {
            rebase(path);
        }

        self
    }

    /// Source folder holding the record files of a category.
    pub fn source_dir(&self, category: Category) -> &Path {
        match category {
            Category::Generic => &self.generic_source_dir,
            Category::Master => &self.master_source_dir,
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.manifest_path
            .clone()
            .unwrap_or_else(|| self.output_dir.join("i18n.json"))
    }

    pub fn localization_source(&self) -> PathBuf {
        self.localization_source.clone().unwrap_or_else(|| {
            self.pretranslation_dir
                .join("etc")
                .join("localization.json")
        })
    }
}
