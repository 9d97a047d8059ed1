//! Directory scanning and JSON writing shared by the reshape and prune phases.

use crate::error::PipelineError;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

/// Regular files in `dir`, sorted by file name.
pub(crate) fn regular_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs_err::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

/// `.json` files in `dir`, sorted by file name.
pub(crate) fn json_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = regular_files(dir)?;
    files.retain(|path| file_name_of(path).ends_with(".json"));
    Ok(files)
}

/// File name of `path` as UTF-8, lossily.
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Writes `value` as 2-space indented JSON, creating parent folders.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(value)?;
    fs_err::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_json_files_sorted_and_filtered() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();

        fs::write(dir.join("b.json"), "[]").unwrap();
        fs::write(dir.join("a.json"), "[]").unwrap();
        fs::write(dir.join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.join("nested.json")).unwrap();

        let files = json_files(dir).unwrap();
        let names: Vec<String> = files.iter().map(|p| file_name_of(p)).collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_write_json_creates_parents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("x").join("y.json");

        write_json(&path, &serde_json::json!({"日本": "語"})).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\n  \"日本\": \"語\"\n}");
    }
}
