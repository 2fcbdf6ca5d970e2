use serde::{Deserialize, Serialize};

/// Lifecycle state of a stored question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Draft,
    Active,
    Archive,
}

impl QuestionStatus {
    /// Status implied by a set of correct answers: no answer means draft.
    pub fn from_corrects(corrects: &[String]) -> Self {
        if corrects.is_empty() {
            Self::Draft
        } else {
            Self::Active
        }
    }
}

/// A deduplicated question, ready for the storage layer.
///
/// Field names on the wire match the document schema (`subject`, `use`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalQuestion {
    pub question: String,
    #[serde(rename = "subject")]
    pub subjects: Vec<String>,
    #[serde(rename = "use")]
    pub uses: Vec<String>,
    /// Answer options, first-seen order, no duplicates.
    pub responses: Vec<String>,
    /// Correct answer texts, sorted, no duplicates.
    pub corrects: Vec<String>,
    pub remark: Option<String>,
    pub status: QuestionStatus,
}
