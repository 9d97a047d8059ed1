//! Merges translated CSVs into raw game scripts.
//!
//! A raw script is one command per line. Every `text=` attribute of a
//! command is a slot; slots are paired, in order, with the rows of the
//! translated CSV and each pair is combined by a [`LineMerger`]. Lines inside
//! a slot are separated by the script's literal `\n` escape.

mod batch;
mod index;
mod mergers;
mod rows;
mod script;

pub use batch::{
    MergeFailure, MergeJob, MergePlan, MergeReport, MergedScript, merge_translation_files,
    plan_merge, run_merge_job,
};
pub use index::{INDEX_FILE_NAME, IndexEntry, IndexSource, TranslationIndex};
pub use mergers::{DualLanguageMerger, ReplaceMerger};
pub use rows::{TranslationRow, parse_translation_csv};
pub use script::{breaks_slot, find_text_slots, split_lines};

use crate::error::MergeError;

/// Line separator inside a script text value.
pub const LINE_BREAK: &str = "\\n";

/// Combines one original text value with its translation.
pub trait LineMerger {
    fn merge(&self, original: &str, translated: &str) -> Result<String, MergeError>;
}

/// Merges the rows of `csv_text` into the slots of `raw_text`.
///
/// Each slot must hold exactly the text of its row, and the numbers of rows
/// and slots must agree. A row with an empty translation leaves its slot
/// untouched. A merged value that would end its slot early is an error.
/// Everything outside the slots, line endings included, is kept.
/// On any error nothing is returned, so callers never see a partial merge.
pub fn merge_translated_csv_into_txt(
    csv_text: &str,
    raw_text: &str,
    merger: &dyn LineMerger,
) -> Result<String, MergeError> {
    let rows = parse_translation_csv(csv_text)?;
    let mut merged = String::with_capacity(raw_text.len());
    let mut slot_count = 0;

    for (line_idx, (body, ending)) in split_lines(raw_text).enumerate() {
        let slots = find_text_slots(body);
        if slots.is_empty() {
            merged.push_str(body);
            merged.push_str(ending);
            continue;
        }

        let mut last = 0;
        for range in slots {
            let original = &body[range.clone()];
            merged.push_str(&body[last..range.start]);
            last = range.end;

            let row = rows.get(slot_count);
            slot_count += 1;

            let Some(row) = row else {
                merged.push_str(original);
                continue;
            };

            if row.text != original {
                return Err(MergeError::TextMismatch {
                    line: line_idx + 1,
                    expected: row.text.clone(),
                    found: original.to_string(),
                });
            }

            if row.trans.is_empty() {
                merged.push_str(original);
                continue;
            }

            let value = merger.merge(original, &row.trans)?;
            if breaks_slot(&value) {
                return Err(MergeError::UnsafeTranslation {
                    line: line_idx + 1,
                    text: value,
                });
            }
            merged.push_str(&value);
        }
        merged.push_str(&body[last..]);
        merged.push_str(ending);
    }

    if slot_count != rows.len() {
        return Err(MergeError::SlotCountMismatch {
            rows: rows.len(),
            slots: slot_count,
        });
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "[backgroundgroup backgrounds=[background id=bg_001]]\r\n\
[message text=おはよう name=咲季]\r\n\
[choicegroup choices=[choice text=はい] choices=[choice text=いいえ]]\r\n";

    const CSV: &str = "id,name,text,trans\n\
0000000000000,咲季,おはよう,Good morning\n\
select,,はい,Yes\n\
select,,いいえ,\n\
info,adv_test.txt,,\n";

    #[test]
    fn test_merge_replaces_slots_and_keeps_other_lines() {
        let merged = merge_translated_csv_into_txt(CSV, SCRIPT, &ReplaceMerger).unwrap();

        assert_eq!(
            merged,
            "[backgroundgroup backgrounds=[background id=bg_001]]\r\n\
[message text=Good morning name=咲季]\r\n\
[choicegroup choices=[choice text=Yes] choices=[choice text=いいえ]]\r\n"
        );
    }

    #[test]
    fn test_merge_dual_language() {
        let merged = merge_translated_csv_into_txt(
            "text,trans\nおはよう\\nございます,早上\\n好\n",
            "[message text=おはよう\\nございます name=咲季]",
            &DualLanguageMerger,
        )
        .unwrap();

        assert_eq!(
            merged,
            "[message text=早上\\nおはよう\\n好\\nございます name=咲季]"
        );
    }

    #[test]
    fn test_merge_text_mismatch_reports_line() {
        let csv = "text,trans\nおはよう,Good morning\nちがう,Wrong\nいいえ,No\n";
        let result = merge_translated_csv_into_txt(csv, SCRIPT, &ReplaceMerger);

        match result {
            Err(MergeError::TextMismatch { line, expected, found }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, "ちがう");
                assert_eq!(found, "はい");
            },
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_merge_rejects_translation_that_closes_the_command() {
        let csv = "text,trans\nおはよう,Good morning\nはい,Yes] [x\nいいえ,No\n";
        let result = merge_translated_csv_into_txt(csv, SCRIPT, &ReplaceMerger);

        match result {
            Err(MergeError::UnsafeTranslation { line, text }) => {
                assert_eq!(line, 3);
                assert_eq!(text, "Yes] [x");
            },
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_merge_rejects_translation_with_attribute() {
        let csv = "text,trans\nおはよう,Hi name=x\nはい,Yes\nいいえ,No\n";
        let result = merge_translated_csv_into_txt(csv, SCRIPT, &ReplaceMerger);
        assert!(matches!(
            result,
            Err(MergeError::UnsafeTranslation { line: 2, .. })
        ));
    }

    #[test]
    fn test_merge_too_few_rows() {
        let csv = "text,trans\nおはよう,Good morning\n";
        let result = merge_translated_csv_into_txt(csv, SCRIPT, &ReplaceMerger);
        assert!(matches!(
            result,
            Err(MergeError::SlotCountMismatch { rows: 1, slots: 3 })
        ));
    }

    #[test]
    fn test_merge_too_many_rows() {
        let csv = "text,trans\nおはよう,a\nはい,b\nいいえ,c\n余り,d\n";
        let result = merge_translated_csv_into_txt(csv, SCRIPT, &ReplaceMerger);
        assert!(matches!(
            result,
            Err(MergeError::SlotCountMismatch { rows: 4, slots: 3 })
        ));
    }

    #[test]
    fn test_merge_uses_injected_merger() {
        struct Upper;
        impl LineMerger for Upper {
            fn merge(&self, _original: &str, translated: &str) -> Result<String, MergeError> {
                Ok(translated.to_uppercase())
            }
        }

        let merged =
            merge_translated_csv_into_txt("text,trans\n朝,morning\n", "[narration text=朝]\n", &Upper)
                .unwrap();
        assert_eq!(merged, "[narration text=MORNING]\n");
    }
}
