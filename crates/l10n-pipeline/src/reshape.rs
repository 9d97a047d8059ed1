//! Reshapes record files into flat per-locale dictionaries.
//!
//! Processing a category runs in discrete phases: every source file is loaded
//! once, the locales are discovered, then each locale's category folder is
//! reset, filled and measured. A category folder that ends up without a
//! single translation is removed again.

use crate::category::Category;
use crate::error::PipelineError;
use crate::files::{file_name_of, json_files, write_json};
use crate::record::{TranslationRecord, load_records};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

/// Flat `raw -> translated` mapping in first-seen key order.
pub type FlatTranslations = IndexMap<String, String>;

/// A source file and its records, or `None` if it could not be loaded.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub file_name: String,
    pub records: Option<Vec<TranslationRecord>>,
}

/// Number of translations written for one source file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileCount {
    pub file_name: String,
    pub count: usize,
}

/// Outcome of one locale within a category.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocaleSummary {
    pub locale: String,
    /// Files that produced at least one translation.
    pub files: Vec<FileCount>,
    pub total: usize,
    /// The category folder was deleted because it stayed empty.
    pub removed: bool,
}

/// Outcome of [`process_category`].
#[derive(Clone, Debug)]
pub struct CategoryReport {
    pub category: Category,
    pub source_dir: PathBuf,
    /// Every locale found in the source records.
    pub discovered: BTreeSet<String>,
    pub locales: Vec<LocaleSummary>,
    /// Locales with at least one translation in this category.
    pub valid: BTreeSet<String>,
}

/// Loads every `.json` file of `source_dir` in file name order.
///
/// Unreadable or malformed files are logged and kept as `None`, so callers
/// can still account for them.
pub fn load_source_files(source_dir: &Path) -> Vec<SourceFile> {
    let paths = match json_files(source_dir) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::warn!("Skipping source folder {}: {}", source_dir.display(), e);
            return Vec::new();
        },
    };

    paths
        .iter()
        .map(|path| {
            let records = match load_records(path) {
                Ok(records) => Some(records),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    None
                },
            };
            SourceFile {
                file_name: file_name_of(path),
                records,
            }
        })
        .collect()
}

/// Whether `code` can name a locale folder: exactly one plain path
/// component, so it never resolves to the output root or outside it.
pub fn is_valid_locale_code(code: &str) -> bool {
    let mut components = Path::new(code).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == code
    )
}

fn locales_in(files: &[SourceFile]) -> BTreeSet<String> {
    let mut locales = BTreeSet::new();

    for file in files {
        let Some(records) = &file.records else {
            continue;
        };

        for code in records.iter().flat_map(TranslationRecord::locales) {
            if locales.contains(code) {
                continue;
            }
            if is_valid_locale_code(code) {
                locales.insert(code.to_string());
            } else {
                tracing::warn!(
                    "Ignoring locale {:?} in {}: not a folder name",
                    code,
                    file.file_name
                );
            }
        }
    }

    locales
}

/// Unions the locale codes found under `translation` in every record file of
/// `source_dir`. Broken files are skipped with a warning.
pub fn collect_available_locales(source_dir: &Path) -> BTreeSet<String> {
    locales_in(&load_source_files(source_dir))
}

/// Extracts the flat dictionary of `locale` from `records`.
///
/// A record contributes only when both its `raw` key and its text for
/// `locale` are non-empty. A later duplicate `raw` replaces the earlier value.
pub fn reshape_for_locale(records: &[TranslationRecord], locale: &str) -> FlatTranslations {
    let mut result = FlatTranslations::new();

    for record in records {
        if let Some(raw) = record.raw_key()
            && let Some(text) = record.text_for(locale)
        {
            result.insert(raw.to_string(), text.to_string());
        }
    }

    result
}

/// Folder receiving the reshaped files of `locale` for `category`.
pub fn category_dir(dest_root: &Path, locale: &str, category: Category) -> PathBuf {
    dest_root.join(locale).join(category.dir_name())
}

/// Reshapes every record file of `source_dir` for every discovered locale
/// into `dest_root/{locale}/{category}/`.
///
/// Each locale's category folder is deleted and recreated first. Files that
/// failed to load write nothing; every other file is written, even when it
/// holds no translation for the locale. Errors creating or resetting output
/// folders propagate.
pub fn process_category(
    source_dir: &Path,
    dest_root: &Path,
    category: Category,
) -> Result<CategoryReport, PipelineError> {
    let sources = load_source_files(source_dir);
    let discovered = locales_in(&sources);

    tracing::info!(
        "Discovered {} locale(s) for {} in {}",
        discovered.len(),
        category,
        source_dir.display()
    );

    let mut locales = Vec::with_capacity(discovered.len());
    let mut valid = BTreeSet::new();

    for locale in &discovered {
        let category_folder = category_dir(dest_root, locale, category);

        if category_folder.exists() {
            fs_err::remove_dir_all(&category_folder)?;
        }
        fs_err::create_dir_all(&category_folder)?;

        let mut files = Vec::new();
        let mut total = 0;

        for source in &sources {
            let Some(records) = &source.records else {
                continue;
            };

            let flat = reshape_for_locale(records, locale);
            write_json(&category_folder.join(&source.file_name), &flat)?;

            total += flat.len();
            if !flat.is_empty() {
                tracing::debug!("{}/{}: {} translation(s)", locale, source.file_name, flat.len());
                files.push(FileCount {
                    file_name: source.file_name.clone(),
                    count: flat.len(),
                });
            }
        }

        let mut removed = false;
        if total > 0 {
            valid.insert(locale.clone());
        } else {
            match fs_err::remove_dir_all(&category_folder) {
                Ok(()) => removed = true,
                Err(e) => {
                    tracing::warn!("Failed to remove empty {}: {}", category_folder.display(), e)
                },
            }

            // Only succeeds when no other category is left in the locale folder.
            if removed && fs_err::remove_dir(dest_root.join(locale)).is_ok() {
                tracing::debug!("Removed empty locale folder {}", locale);
            }
        }

        locales.push(LocaleSummary {
            locale: locale.clone(),
            files,
            total,
            removed,
        });
    }

    Ok(CategoryReport {
        category,
        source_dir: source_dir.to_path_buf(),
        discovered,
        locales,
        valid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_records;
    use rstest::rstest;
    use std::fs;

    const HELLO: &str = r#"[{"raw":"Hello","translation":{"zh-CN":{"text":"你好"}}}]"#;

    #[rstest]
    #[case::matching_locale("zh-CN", &[("Hello", "你好")])]
    #[case::missing_locale("ja-JP", &[])]
    fn test_reshape_hello(#[case] locale: &str, #[case] expected: &[(&str, &str)]) {
        let records = parse_records(HELLO).unwrap();
        let flat = reshape_for_locale(&records, locale);

        let pairs: Vec<(&str, &str)> = flat
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_reshape_skips_empty_raw_and_text() {
        let records = parse_records(
            r#"[
                {"raw":"","translation":{"en":{"text":"x"}}},
                {"raw":"a","translation":{"en":{"text":""}}},
                {"raw":"b","translation":{"en":{"author":"only"}}},
                {"raw":"c","translation":{"en":{"text":"C"}}}
            ]"#,
        )
        .unwrap();

        let flat = reshape_for_locale(&records, "en");
        assert_eq!(flat.len(), 1);
        assert_eq!(flat["c"], "C");
    }

    #[test]
    fn test_reshape_last_duplicate_wins_in_place() {
        let records = parse_records(
            r#"[
                {"raw":"a","translation":{"en":{"text":"first"}}},
                {"raw":"b","translation":{"en":{"text":"B"}}},
                {"raw":"a","translation":{"en":{"text":"second"}}}
            ]"#,
        )
        .unwrap();

        let flat = reshape_for_locale(&records, "en");
        let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(flat["a"], "second");
    }

    #[test]
    fn test_collect_available_locales_skips_broken_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let src = temp_dir.path();

        fs::write(src.join("a.json"), HELLO).unwrap();
        fs::write(src.join("broken.json"), "[{").unwrap();
        fs::write(
            src.join("c.json"),
            r#"[{"raw":"x","translation":{"ja-JP":{"text":"エックス"}}}]"#,
        )
        .unwrap();

        let locales = collect_available_locales(src);
        assert_eq!(
            locales.into_iter().collect::<Vec<_>>(),
            vec!["ja-JP".to_string(), "zh-CN".to_string()]
        );
    }

    #[rstest]
    #[case::plain("zh-CN", true)]
    #[case::empty("", false)]
    #[case::current(".", false)]
    #[case::parent("..", false)]
    #[case::nested("a/b", false)]
    #[case::escaping("a/../..", false)]
    #[case::trailing_separator("en/", false)]
    #[case::absolute("/tmp", false)]
    fn test_is_valid_locale_code(#[case] code: &str, #[case] expected: bool) {
        assert_eq!(is_valid_locale_code(code), expected);
    }

    #[test]
    fn test_collect_available_locales_ignores_path_like_codes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let src = temp_dir.path();

        fs::write(
            src.join("a.json"),
            r#"[{"raw":"Hello","translation":{
                "zh-CN":{"text":"你好"},"":{"text":"x"},"..":{"text":"y"},"a/../..":{"text":"z"}
            }}]"#,
        )
        .unwrap();

        let locales = collect_available_locales(src);
        assert_eq!(locales.into_iter().collect::<Vec<_>>(), vec!["zh-CN".to_string()]);
    }

    #[test]
    fn test_collect_available_locales_missing_dir() {
        let locales = collect_available_locales(Path::new("/nonexistent/records"));
        assert!(locales.is_empty());
    }

    #[test]
    fn test_process_category_writes_and_removes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let src = temp_dir.path().join("src");
        let dest = temp_dir.path().join("out");
        fs::create_dir_all(&src).unwrap();

        fs::write(
            src.join("ui.json"),
            r#"[
                {"raw":"Hello","translation":{"zh-CN":{"text":"你好"},"ja-JP":{"text":""}}}
            ]"#,
        )
        .unwrap();
        fs::write(src.join("other.json"), "[]").unwrap();
        fs::write(src.join("broken.json"), "not json").unwrap();

        let report = process_category(&src, &dest, Category::Generic).unwrap();

        assert_eq!(report.discovered.len(), 2);
        assert_eq!(
            report.valid.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["zh-CN"]
        );

        let zh_dir = category_dir(&dest, "zh-CN", Category::Generic);
        assert_eq!(
            fs::read_to_string(zh_dir.join("ui.json")).unwrap(),
            "{\n  \"Hello\": \"你好\"\n}"
        );
        assert_eq!(fs::read_to_string(zh_dir.join("other.json")).unwrap(), "{}");
        assert!(!zh_dir.join("broken.json").exists());

        assert!(!category_dir(&dest, "ja-JP", Category::Generic).exists());
        assert!(!dest.join("ja-JP").exists());
        let ja = report.locales.iter().find(|l| l.locale == "ja-JP").unwrap();
        assert!(ja.removed);
        assert_eq!(ja.total, 0);

        let zh = report.locales.iter().find(|l| l.locale == "zh-CN").unwrap();
        assert_eq!(
            zh.files,
            vec![FileCount {
                file_name: "ui.json".to_string(),
                count: 1
            }]
        );
    }

    #[test]
    fn test_process_category_resets_stale_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let src = temp_dir.path().join("src");
        let dest = temp_dir.path().join("out");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.json"), HELLO).unwrap();

        let stale = category_dir(&dest, "zh-CN", Category::Master).join("stale.json");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, r#"{"old":"value"}"#).unwrap();

        process_category(&src, &dest, Category::Master).unwrap();

        assert!(!stale.exists());
        assert!(
            category_dir(&dest, "zh-CN", Category::Master)
                .join("a.json")
                .exists()
        );
    }
}
