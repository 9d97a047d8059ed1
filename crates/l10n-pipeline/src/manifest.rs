//! The `i18n.json` locale manifest read by the client.

use crate::error::PipelineError;
use crate::files::write_json;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("zh-CN", "简体中文"),
    ("zh-TW", "繁体中文"),
    ("ja-JP", "日本語"),
    ("en", "English"),
    ("en-US", "English"),
    ("ko-KR", "한국어"),
    ("fr-FR", "Français"),
    ("de-DE", "Deutsch"),
    ("es-ES", "Español"),
    ("it-IT", "Italiano"),
    ("pt-BR", "Português"),
    ("ru-RU", "Русский"),
];

/// Human readable names of locale codes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisplayNames {
    names: BTreeMap<String, String>,
}

impl Default for DisplayNames {
    fn default() -> Self {
        Self {
            names: DEFAULT_DISPLAY_NAMES
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }
}

impl DisplayNames {
    /// Adds or replaces names.
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Self {
        for (code, name) in overrides {
            self.names.insert(code.clone(), name.clone());
        }
        self
    }

    /// Name of `code`, or the code itself when unknown.
    pub fn name_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.names.get(code).map(String::as_str).unwrap_or(code)
    }
}

/// One manifest line.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ManifestEntry {
    pub name: String,
    pub code: String,
}

/// Manifest entries for `locales`, sorted by code.
pub fn build_manifest<'a>(
    locales: impl IntoIterator<Item = &'a String>,
    display_names: &DisplayNames,
) -> Vec<ManifestEntry> {
    let mut entries: Vec<ManifestEntry> = locales
        .into_iter()
        .map(|code| ManifestEntry {
            name: display_names.name_for(code).to_string(),
            code: code.clone(),
        })
        .collect();

    entries.sort_by(|a, b| a.code.cmp(&b.code));
    entries.dedup_by(|a, b| a.code == b.code);
    entries
}

/// Writes the manifest for `locales` to `output_path` and returns its entries.
pub fn write_manifest<'a>(
    locales: impl IntoIterator<Item = &'a String>,
    display_names: &DisplayNames,
    output_path: &Path,
) -> Result<Vec<ManifestEntry>, PipelineError> {
    let entries = build_manifest(locales, display_names);
    write_json(output_path, &entries)?;
    Ok(entries)
}
