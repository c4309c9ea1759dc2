/// Clean a header the way users expect to type it back: invisible characters removed,
/// whitespace runs collapsed.
pub(crate) fn clean_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase free-text answers and fold typographic dashes and comparison signs to
/// ASCII so band keywords match regardless of how the survey rendered them.
pub(crate) fn normalize_answer(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['\u{2013}', '\u{2014}'], "-")
        .replace('\u{2265}', ">=")
        .replace('\u{2264}', "<=")
}

/// Treat blank cells as missing.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
