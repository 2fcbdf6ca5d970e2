mod question;
mod row;
mod stats;

pub use question::{CanonicalQuestion, QuestionStatus};
pub use row::{CleanedFields, RawRow, OPTION_LABELS};
pub use stats::ImportStats;
