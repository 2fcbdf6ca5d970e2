use serde::{Deserialize, Serialize};

/// Counters collected over one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub total_rows: u64,
    /// Distinct questions produced.
    pub valid_questions: u64,
    /// Rows folded into an already-seen question.
    pub merged_questions: u64,
    pub subject_corrections: u64,
}

impl ImportStats {
    /// Rows dropped because their question was empty.
    pub fn discarded_rows(&self) -> u64 {
        self.total_rows
            .saturating_sub(self.valid_questions)
            .saturating_sub(self.merged_questions)
    }
}
