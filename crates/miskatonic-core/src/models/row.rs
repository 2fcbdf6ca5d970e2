use serde::{Deserialize, Serialize};

/// Answer-option labels, in the fixed order the columns appear.
pub const OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// One CSV record as parsed, before any cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, rename = "use")]
    pub usage: Option<String>,
    /// Raw correct-answer tokens, e.g. "A, C" or "b-d".
    #[serde(default)]
    pub correct: Option<String>,
    #[serde(default, rename = "responseA")]
    pub response_a: Option<String>,
    #[serde(default, rename = "responseB")]
    pub response_b: Option<String>,
    #[serde(default, rename = "responseC")]
    pub response_c: Option<String>,
    #[serde(default, rename = "responseD")]
    pub response_d: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

impl RawRow {
    /// The four answer columns in A, B, C, D order.
    pub fn responses(&self) -> [Option<&str>; 4] {
        [
            self.response_a.as_deref(),
            self.response_b.as_deref(),
            self.response_c.as_deref(),
            self.response_d.as_deref(),
        ]
    }
}

/// Trimmed projection of a [`RawRow`] that passed cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedFields {
    /// Standardized question stem, never empty.
    pub question: String,
    pub subject: Option<String>,
    pub usage: Option<String>,
    /// Correct-answer labels in reading order. Unknown labels are kept.
    pub correct_labels: Vec<String>,
    /// Answer texts indexed like [`OPTION_LABELS`].
    pub options: [Option<String>; 4],
    pub remark: Option<String>,
}

impl CleanedFields {
    /// Text of the option with the given label, if the label is known and filled.
    pub fn option(&self, label: &str) -> Option<&str> {
        OPTION_LABELS
            .iter()
            .position(|&l| l == label)
            .and_then(|idx| self.options[idx].as_deref())
    }

    /// Present option texts in A, B, C, D order.
    pub fn option_texts(&self) -> Vec<String> {
        self.options.iter().flatten().cloned().collect()
    }

    /// Texts of the options named by `correct_labels`, in label order.
    ///
    /// Labels that name no present option are skipped; repeats are kept.
    pub fn correct_texts(&self) -> Vec<String> {
        self.correct_labels
            .iter()
            .filter_map(|label| self.option(label))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(options: [Option<&str>; 4], labels: &[&str]) -> CleanedFields {
        CleanedFields {
            question: "q".into(),
            correct_labels: labels.iter().map(|l| l.to_string()).collect(),
            options: options.map(|o| o.map(str::to_string)),
            ..Default::default()
        }
    }

    #[test]
    fn test_option_texts_skip_absent() {
        let f = fields([Some("1"), None, Some("3"), None], &[]);
        assert_eq!(f.option_texts(), vec!["1", "3"]);
    }

    #[test]
    fn test_correct_texts_follow_label_order() {
        let f = fields([Some("1"), Some("2"), Some("3"), None], &["C", "A", "C"]);
        assert_eq!(f.correct_texts(), vec!["3", "1", "3"]);
    }

    #[test]
    fn test_correct_texts_drop_unmapped_labels() {
        let f = fields([Some("1"), Some("2"), None, None], &["B", "C", "E", "AB"]);
        assert_eq!(f.correct_texts(), vec!["2"]);
    }
}
