//! Comparison-key normalization for subject and question text.
//!
//! Reduces a string to the characters that can tell two spellings apart:
//! accents, case, spacing and punctuation are all erased. The result is only
//! ever used for scoring, never shown or stored.

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Apply the full normalization pipeline.
///
/// Levels applied in order:
/// 1. Unicode NFKD decomposition
/// 2. Combining mark removal
/// 3. Case folding
/// 4. Alphanumeric filter
pub fn normalize(s: &str) -> String {
    let s = decompose(s);
    let s = strip_combining_marks(&s);
    let s = fold_case(&s);
    keep_alphanumeric(&s)
}

// ── Level 1: Unicode NFKD ─────────────────────────────────────────────

/// Split precomposed characters into base + combining marks, and map
/// compatibility forms (fullwidth, ligatures) onto their plain equivalents.
fn decompose(s: &str) -> String {
    s.nfkd().collect()
}

// ── Level 2: Combining marks ──────────────────────────────────────────

/// Drop every character with a non-zero canonical combining class.
fn strip_combining_marks(s: &str) -> String {
    s.chars()
        .filter(|&c| canonical_combining_class(c) == 0)
        .collect()
}

// ── Level 3: Case folding ─────────────────────────────────────────────

fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

// ── Level 4: Alphanumeric filter ──────────────────────────────────────

/// Keep letters and digits only; whitespace, punctuation and symbols go.
fn keep_alphanumeric(s: &str) -> String {
    s.chars().filter(|c| c.is_alphanumeric()).collect()
}
