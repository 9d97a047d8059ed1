use super::LINE_BREAK;
use crate::error::MergeError;
use csv::ReaderBuilder;

/// One source text paired with its translation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TranslationRow {
    pub text: String,
    pub trans: String,
}

/// Parses a translated CSV into rows, in file order.
///
/// The header must name a `text` and a `trans` column; other columns are
/// ignored except `id`, where the value `info` marks a metadata row. Rows with
/// an empty `text` are dropped. Real line breaks inside a cell are rewritten
/// to the script's `\n` escape so cells compare equal to script text.
pub fn parse_translation_csv(csv_text: &str) -> Result<Vec<TranslationRow>, MergeError> {
    let csv_text = csv_text.strip_prefix('\u{feff}').unwrap_or(csv_text);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|header| header.trim() == name);

    let text_idx = column("text").ok_or(MergeError::MissingColumn("text"))?;
    let trans_idx = column("trans").ok_or(MergeError::MissingColumn("trans"))?;
    let id_idx = column("id");

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;

        if let Some(idx) = id_idx
            && record.get(idx).is_some_and(|id| id.trim() == "info")
        {
            continue;
        }

        let text = escape_line_breaks(record.get(text_idx).unwrap_or_default());
        if text.is_empty() {
            continue;
        }
        let trans = escape_line_breaks(record.get(trans_idx).unwrap_or_default());

        rows.push(TranslationRow { text, trans });
    }

    Ok(rows)
}

fn escape_line_breaks(cell: &str) -> String {
    cell.replace("\r\n", LINE_BREAK).replace('\n', LINE_BREAK)
}
