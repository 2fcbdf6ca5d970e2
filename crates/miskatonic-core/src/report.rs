use crate::models::{CanonicalQuestion, ImportStats};

/// Split the questions into insert batches of at most `batch_size`.
///
/// A zero batch size is treated as one question per batch.
pub fn batches(
    questions: &[CanonicalQuestion],
    batch_size: usize,
) -> impl Iterator<Item = &[CanonicalQuestion]> {
    questions.chunks(batch_size.max(1))
}

/// One-line summary of an import, omitting counters that are zero.
pub fn summary(stats: &ImportStats) -> String {
    let mut parts = vec![format!("{} questions", stats.valid_questions)];

    if stats.merged_questions > 0 {
        parts.push(format!("{} merged", stats.merged_questions));
    }
    if stats.subject_corrections > 0 {
        parts.push(format!("{} subjects corrected", stats.subject_corrections));
    }
    let discarded = stats.discarded_rows();
    if discarded > 0 {
        parts.push(format!("{discarded} rows skipped"));
    }

    format!("Import finished: {}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionStatus;

    fn question(text: &str) -> CanonicalQuestion {
        CanonicalQuestion {
            question: text.into(),
            subjects: vec![],
            uses: vec![],
            responses: vec![],
            corrects: vec![],
            remark: None,
            status: QuestionStatus::Draft,
        }
    }

    #[test]
    fn test_batches_split_evenly() {
        let qs: Vec<_> = (0..5).map(|i| question(&i.to_string())).collect();
        let sizes: Vec<usize> = batches(&qs, 2).map(<[_]>::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn test_batches_zero_size() {
        let qs = vec![question("a"), question("b")];
        assert_eq!(batches(&qs, 0).count(), 2);
        assert_eq!(batches(&[], 10).count(), 0);
    }

    #[test]
    fn test_summary_all_parts() {
        let stats = ImportStats {
            total_rows: 10,
            valid_questions: 6,
            merged_questions: 3,
            subject_corrections: 2,
        };
        assert_eq!(
            summary(&stats),
            "Import finished: 6 questions, 3 merged, 2 subjects corrected, 1 rows skipped"
        );
    }

    #[test]
    fn test_summary_omits_zero_counters() {
        let stats = ImportStats {
            total_rows: 4,
            valid_questions: 4,
            ..Default::default()
        };
        assert_eq!(summary(&stats), "Import finished: 4 questions");
    }
}
