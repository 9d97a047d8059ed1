use super::{LINE_BREAK, LineMerger};
use crate::error::MergeError;

fn paired_lines<'a>(
    original: &'a str,
    translated: &'a str,
) -> Result<Vec<(&'a str, &'a str)>, MergeError> {
    let original_lines: Vec<&str> = original.split(LINE_BREAK).collect();
    let translated_lines: Vec<&str> = translated.split(LINE_BREAK).collect();

    if original_lines.len() != translated_lines.len() {
        return Err(MergeError::LineCountMismatch {
            original: original_lines.len(),
            translated: translated_lines.len(),
            text: original.to_string(),
        });
    }

    Ok(original_lines.into_iter().zip(translated_lines).collect())
}

/// Replaces the original text with the translation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReplaceMerger;

impl LineMerger for ReplaceMerger {
    fn merge(&self, original: &str, translated: &str) -> Result<String, MergeError> {
        paired_lines(original, translated)?;
        Ok(translated.to_string())
    }
}

/// Shows both languages: each translated line is followed by its original
/// line. Lines the translation leaves unchanged appear once.
#[derive(Clone, Copy, Debug, Default)]
pub struct DualLanguageMerger;

impl LineMerger for DualLanguageMerger {
    fn merge(&self, original: &str, translated: &str) -> Result<String, MergeError> {
        let mut lines = Vec::new();

        for (original_line, translated_line) in paired_lines(original, translated)? {
            lines.push(translated_line);
            if translated_line != original_line {
                lines.push(original_line);
            }
        }

        Ok(lines.join(LINE_BREAK))
    }
}
