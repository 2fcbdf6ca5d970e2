use crate::models::{CleanedFields, RawRow};

/// Characters stripped from the end of a question stem.
const TRAILING_PUNCTUATION: &[char] = &[':', '?', '!', '.'];

/// Clean a raw CSV record.
///
/// Returns `None` when the row has no usable question and must be skipped.
pub fn clean_row(raw: &RawRow) -> Option<CleanedFields> {
    let question = standardize_question(raw.question.as_deref().unwrap_or_default());
    if question.is_empty() {
        return None;
    }

    Some(CleanedFields {
        question,
        subject: strip_or_none(raw.subject.as_deref()),
        usage: strip_or_none(raw.usage.as_deref()),
        correct_labels: parse_correct(raw.correct.as_deref().unwrap_or_default()),
        options: raw.responses().map(strip_or_none),
        remark: strip_or_none(raw.remark.as_deref()),
    })
}

/// Trim a field, mapping blank values to `None`.
pub fn strip_or_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trim a question and strip any run of trailing `: ? ! .`.
///
/// Whitespace between stripped characters goes too, so `"Why ? !"` becomes
/// `"Why"`.
pub fn standardize_question(question: &str) -> String {
    let mut stem = question.trim();
    while let Some(rest) = stem.strip_suffix(TRAILING_PUNCTUATION) {
        stem = rest.trim_end();
    }
    stem.to_string()
}

/// Deduplication key of a question: its standardized form, lowercased.
pub fn question_key(question: &str) -> String {
    standardize_question(question).to_lowercase()
}

/// Split the `correct` column into uppercase labels, in reading order.
///
/// Commas, hyphens and whitespace all separate labels: `"a, c"`, `"A-C"` and
/// `"A C"` give the same result.
pub fn parse_correct(value: &str) -> Vec<String> {
    value
        .to_uppercase()
        .replace([',', '-'], " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
