//! Translation records as stored by the community translation repositories.
//!
//! A record file is a JSON array:
//!
//! ```json
//! [
//!   {
//!     "raw": "原文",
//!     "translation": {
//!       "zh-CN": { "text": "中文翻译", "author": "someone" }
//!     }
//!   }
//! ]
//! ```
//!
//! Loading is lenient. Items that are not objects, a `raw` that is not a
//! string and a `translation` that is not an object are ignored rather than
//! rejected, so one odd entry never hides the rest of the file.

use crate::error::PipelineError;
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;

/// The translation of one record into one locale.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LocaleText {
    pub text: String,
    pub author: Option<String>,
}

impl LocaleText {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            text: object
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            author: object
                .get("author")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

/// One source string with its per-locale translations.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TranslationRecord {
    /// The source-language key.
    pub raw: Option<String>,
    /// Every locale key present under `translation`. The value is `None` when
    /// the locale entry is not an object.
    pub translation: IndexMap<String, Option<LocaleText>>,
}

impl TranslationRecord {
    /// Builds a record from one array item, or `None` if the item is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let raw = object.get("raw").and_then(Value::as_str).map(str::to_string);
        let translation = object
            .get("translation")
            .and_then(Value::as_object)
            .map(|locales| {
                locales
                    .iter()
                    .map(|(code, entry)| (code.clone(), LocaleText::from_value(entry)))
                    .collect()
            })
            .unwrap_or_default();

        Some(Self { raw, translation })
    }

    /// Locale codes listed under `translation`, whatever their content.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.translation.keys().map(String::as_str)
    }

    /// The non-empty translated text for `locale`.
    pub fn text_for(&self, locale: &str) -> Option<&str> {
        self.translation
            .get(locale)?
            .as_ref()
            .map(|entry| entry.text.as_str())
            .filter(|text| !text.is_empty())
    }

    /// The non-empty source key.
    pub fn raw_key(&self) -> Option<&str> {
        self.raw.as_deref().filter(|raw| !raw.is_empty())
    }
}

/// Parses record file content. A top-level value that is not an array
/// yields no records.
pub fn parse_records(content: &str) -> Result<Vec<TranslationRecord>, serde_json::Error> {
    let value: Value = serde_json::from_str(content)?;

    Ok(match value {
        Value::Array(items) => items
            .iter()
            .filter_map(TranslationRecord::from_value)
            .collect(),
        _ => Vec::new(),
    })
}

/// Reads and parses a record file.
pub fn load_records(path: &Path) -> Result<Vec<TranslationRecord>, PipelineError> {
    let content = fs_err::read_to_string(path)?;
    Ok(parse_records(&content)?)
}
