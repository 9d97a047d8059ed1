use crate::category::Category;
use crate::files::json_files;
use crate::reshape::is_valid_locale_code;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// Outcome of [`prune_empty_locales`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PruneReport {
    /// Locales whose folder holds at least one non-empty category.
    pub kept: BTreeSet<String>,
    /// Locale folders that were deleted.
    pub removed: Vec<String>,
}

/// Whether a decoded JSON value counts as empty: `{}`, `[]`, `""`, `0`,
/// `false` and `null` do.
pub fn is_json_value_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Whether `dir` holds no JSON file with content.
///
/// A missing folder is empty. Files that cannot be read or decoded are
/// ignored, so a folder holding only broken files is empty too.
pub fn is_category_dir_empty(dir: &Path) -> bool {
    if !dir.exists() {
        return true;
    }

    let Ok(files) = json_files(dir) else {
        return true;
    };

    !files.iter().any(|path| {
        fs_err::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .is_some_and(|value| !is_json_value_empty(&value))
    })
}

/// Deletes every candidate locale folder under `dest_root` whose category
/// subfolders are all empty. Returns the locales that remain.
///
/// Candidates without a folder, or whose code is not a single folder name,
/// are neither kept nor removed. A deletion
/// failure is logged and the locale is left out of the kept set.
pub fn prune_empty_locales(
    dest_root: &Path,
    candidate_locales: &BTreeSet<String>,
) -> PruneReport {
    let mut report = PruneReport::default();

    for locale in candidate_locales {
        if !is_valid_locale_code(locale) {
            tracing::warn!("Not pruning {:?}: not a locale folder name", locale);
            continue;
        }

        let locale_dir = dest_root.join(locale);
        if !locale_dir.exists() {
            continue;
        }

        let has_content = Category::all()
            .any(|category| !is_category_dir_empty(&locale_dir.join(category.dir_name())));

        if has_content {
            report.kept.insert(locale.clone());
            continue;
        }

        match fs_err::remove_dir_all(&locale_dir) {
            Ok(()) => {
                tracing::info!("Removed empty locale folder {}", locale);
                report.removed.push(locale.clone());
            },
            Err(e) => tracing::warn!("Failed to remove locale folder {}: {}", locale, e),
        }
    }

    report
}
