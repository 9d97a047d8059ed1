use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static SLOT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[\s\[])text=").expect("slot start pattern is valid"));

static VALUE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+[A-Za-z_][A-Za-z0-9_]*=|\]").expect("value end pattern is valid")
});

/// Byte ranges of the non-empty `text=` values of a script command line.
///
/// A value runs until the next ` key=` attribute or the closing `]` of its
/// command. Lines that are not commands (not starting with `[`) have no slots.
pub fn find_text_slots(line: &str) -> Vec<Range<usize>> {
    let mut slots = Vec::new();

    if !line.trim_start().starts_with('[') {
        return slots;
    }

    let mut search_from = 0;
    while let Some(found) = SLOT_START.find_at(line, search_from) {
        let start = found.end();
        let end = VALUE_END
            .find_at(line, start)
            .map_or(line.len(), |m| m.start());

        if end > start {
            slots.push(start..end);
        }
        search_from = end;
    }

    slots
}

/// Whether `value` would end its slot early or span lines if written into
/// a `text=` slot, changing how the command is read back.
pub fn breaks_slot(value: &str) -> bool {
    VALUE_END.is_match(value) || value.contains(['\r', '\n'])
}

/// Splits `raw_text` into `(body, line_ending)` pairs, keeping `\n` or
/// `\r\n` endings so the text can be rebuilt byte for byte.
pub fn split_lines(raw_text: &str) -> impl Iterator<Item = (&str, &str)> {
    raw_text.split_inclusive('\n').map(|line| {
        let body = line
            .strip_suffix('\n')
            .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
            .unwrap_or(line);
        (body, &line[body.len()..])
    })
}
