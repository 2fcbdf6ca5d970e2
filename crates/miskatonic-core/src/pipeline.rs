use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::cleaner::{clean_row, question_key};
use crate::config::ImportConfig;
use crate::csv_source::CsvSource;
use crate::error::ImportError;
use crate::merger::{QuestionRegistry, Upsert};
use crate::models::{CanonicalQuestion, ImportStats, RawRow};
use crate::subject::{canonicalize, SubjectRegistry};

/// What happened to a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row had no question and was skipped.
    Discarded,
    /// The row introduced a new question.
    Inserted { subject_corrected: bool },
    /// The row was folded into an existing question.
    Merged { subject_corrected: bool },
}

/// Final result of an import run.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// Canonical questions in first-insertion order.
    pub questions: Vec<CanonicalQuestion>,
    pub stats: ImportStats,
}

/// One import run.
///
/// Owns every registry the run needs, so separate runs never share state.
/// Rows must be pushed in input order: merges and subject canonicalization
/// both depend on it.
#[derive(Debug)]
pub struct Pipeline {
    config: ImportConfig,
    subjects: SubjectRegistry,
    questions: QuestionRegistry,
    stats: ImportStats,
}

impl Pipeline {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            subjects: SubjectRegistry::new(),
            questions: QuestionRegistry::new(config.merge_policy),
            stats: ImportStats::default(),
        }
    }

    /// Feed one raw row through clean → canonicalize → upsert.
    pub fn push(&mut self, raw: &RawRow) -> RowOutcome {
        self.stats.total_rows += 1;

        let Some(mut fields) = clean_row(raw) else {
            debug!(row = self.stats.total_rows, "Row without question skipped");
            return RowOutcome::Discarded;
        };

        let key = question_key(&fields.question);

        let mut subject_corrected = false;
        if self.config.fix_subjects {
            if let Some(subject) = fields.subject.take() {
                let (canonical, corrected) = canonicalize(
                    &subject,
                    &self.subjects,
                    self.config.subject_similarity_threshold,
                );
                self.subjects.record(&canonical);
                if corrected {
                    self.stats.subject_corrections += 1;
                    subject_corrected = true;
                }
                fields.subject = Some(canonical);
            }
        }

        match self.questions.upsert(&key, &fields) {
            Upsert::Inserted => RowOutcome::Inserted { subject_corrected },
            Upsert::Merged => {
                self.stats.merged_questions += 1;
                RowOutcome::Merged { subject_corrected }
            }
        }
    }

    /// Close the run and hand out the questions and final counters.
    pub fn finish(self) -> ImportOutcome {
        let mut stats = self.stats;
        stats.valid_questions = self.questions.len() as u64;

        info!(
            total_rows = stats.total_rows,
            valid_questions = stats.valid_questions,
            merged_questions = stats.merged_questions,
            subject_corrections = stats.subject_corrections,
            distinct_subjects = self.subjects.len(),
            "Import run complete"
        );

        ImportOutcome {
            questions: self.questions.into_questions(),
            stats,
        }
    }
}

/// Run the whole pipeline over in-memory rows.
#[tracing::instrument(name = "import_rows", skip_all, fields(fix_subjects = config.fix_subjects))]
pub fn run<I>(rows: I, config: &ImportConfig) -> ImportOutcome
where
    I: IntoIterator<Item = RawRow>,
{
    let mut pipeline = Pipeline::new(*config);
    for row in rows {
        pipeline.push(&row);
    }
    pipeline.finish()
}

/// Validate headers, then run the pipeline over every CSV record.
///
/// Any decoding error aborts the run; no partial result is returned.
#[tracing::instrument(name = "import_csv", skip_all, fields(fix_subjects = config.fix_subjects))]
pub fn import_csv<R: Read>(input: R, config: &ImportConfig) -> Result<ImportOutcome, ImportError> {
    config.validate()?;
    import_source(CsvSource::new(input)?, config)
}

/// [`import_csv`] over a file on disk.
#[tracing::instrument(
    name = "import_file",
    skip_all,
    fields(path = %path.display(), fix_subjects = config.fix_subjects)
)]
pub fn import_file(path: &Path, config: &ImportConfig) -> Result<ImportOutcome, ImportError> {
    config.validate()?;
    import_source(CsvSource::open(path)?, config)
}

fn import_source<R: Read>(
    source: CsvSource<R>,
    config: &ImportConfig,
) -> Result<ImportOutcome, ImportError> {
    let mut pipeline = Pipeline::new(*config);
    for row in source.rows() {
        pipeline.push(&row?);
    }
    Ok(pipeline.finish())
}
