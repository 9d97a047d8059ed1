use indexmap::IndexMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use strum::Display;

/// File listing raw script names and their translation CSVs.
pub const INDEX_FILE_NAME: &str = "index.json";

/// Which translation tier an index entry came from.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum IndexSource {
    /// Machine pretranslation.
    #[strum(serialize = "pretranslation")]
    Pretranslation,
    /// Human-adapted translation. Always wins over [`IndexSource::Pretranslation`].
    #[strum(serialize = "adapted")]
    Adapted,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexEntry {
    /// Translation CSV, resolved against its index folder.
    pub path: PathBuf,
    pub source: IndexSource,
}

/// Maps raw script file names to the translation CSV used for them.
#[derive(Clone, Debug, Default)]
pub struct TranslationIndex {
    entries: BTreeMap<String, IndexEntry>,
}

impl TranslationIndex {
    /// Loads the pretranslation index, then lets the adapted index override
    /// every file name they share.
    pub fn load(pretranslation_dir: &Path, translation_dir: &Path) -> Self {
        let mut index = Self::default();
        index.load_tier(pretranslation_dir, IndexSource::Pretranslation);
        index.load_tier(translation_dir, IndexSource::Adapted);
        index
    }

    /// Adds the entries of `dir/index.json`, replacing existing file names.
    /// A missing or malformed index is logged and adds nothing.
    pub fn load_tier(&mut self, dir: &Path, source: IndexSource) {
        let index_path = dir.join(INDEX_FILE_NAME);

        let content = match fs_err::read_to_string(&index_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Skipping {} index: {}", source, e);
                return;
            },
        };

        let entries: IndexMap<String, Value> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Skipping {} index {}: {}", source, index_path.display(), e);
                return;
            },
        };

        for (file_name, relative) in entries {
            let Some(relative) = relative.as_str() else {
                tracing::warn!("Ignoring non-string {} index entry for {}", source, file_name);
                continue;
            };

            self.entries.insert(
                file_name,
                IndexEntry {
                    path: dir.join(relative),
                    source,
                },
            );
        }
    }

    pub fn get(&self, file_name: &str) -> Option<&IndexEntry> {
        self.entries.get(file_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
