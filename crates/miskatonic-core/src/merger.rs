//! Question deduplication.
//!
//! Rows sharing a question key collapse into one [`CanonicalQuestion`]:
//! answer options are appended in first-seen order, correct answers are kept
//! as a sorted set, and the status is recomputed from the corrects after
//! every change.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::{CanonicalQuestion, CleanedFields, QuestionStatus};

/// What happens to subject and use tags when a duplicate row is merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Tags of the first row win; later rows only contribute answers.
    #[default]
    FirstSeen,
    /// Tags of every row are unioned, first-seen order.
    UnionTags,
}

/// Outcome of feeding one cleaned row to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Merged,
}

/// Canonical questions of one run, keyed by question key, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct QuestionRegistry {
    questions: IndexMap<String, CanonicalQuestion>,
    policy: MergePolicy,
}

impl QuestionRegistry {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            questions: IndexMap::new(),
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&CanonicalQuestion> {
        self.questions.get(key)
    }

    /// Insert a new question under `key`, or merge into the existing one.
    ///
    /// `fields.subject` must already be canonicalized.
    pub fn upsert(&mut self, key: &str, fields: &CleanedFields) -> Upsert {
        let responses = fields.option_texts();
        let corrects = fields.correct_texts();

        match self.questions.get_mut(key) {
            Some(existing) => {
                merge_into(existing, fields, responses, corrects, self.policy);
                tracing::debug!(
                    key,
                    responses = existing.responses.len(),
                    corrects = existing.corrects.len(),
                    "Question merged"
                );
                Upsert::Merged
            }
            None => {
                let question = create(fields, responses, corrects);
                self.questions.insert(key.to_string(), question);
                Upsert::Inserted
            }
        }
    }

    /// Consume the registry, yielding questions in first-insertion order.
    pub fn into_questions(self) -> Vec<CanonicalQuestion> {
        self.questions.into_values().collect()
    }
}

fn create(
    fields: &CleanedFields,
    responses: Vec<String>,
    corrects: Vec<String>,
) -> CanonicalQuestion {
    let corrects = union_sorted(Vec::new(), corrects);
    CanonicalQuestion {
        question: fields.question.clone(),
        subjects: fields.subject.iter().cloned().collect(),
        uses: fields.usage.iter().cloned().collect(),
        responses: append_unseen(Vec::new(), responses),
        status: QuestionStatus::from_corrects(&corrects),
        corrects,
        remark: fields.remark.clone(),
    }
}

fn merge_into(
    existing: &mut CanonicalQuestion,
    fields: &CleanedFields,
    responses: Vec<String>,
    corrects: Vec<String>,
    policy: MergePolicy,
) {
    existing.responses = append_unseen(std::mem::take(&mut existing.responses), responses);
    existing.corrects = union_sorted(std::mem::take(&mut existing.corrects), corrects);
    existing.status = QuestionStatus::from_corrects(&existing.corrects);

    if policy == MergePolicy::UnionTags {
        let subjects = fields.subject.iter().cloned().collect();
        existing.subjects = append_unseen(std::mem::take(&mut existing.subjects), subjects);
        let uses = fields.usage.iter().cloned().collect();
        existing.uses = append_unseen(std::mem::take(&mut existing.uses), uses);
    }
}

/// Append the items of `new` not already present, keeping existing order.
fn append_unseen(mut existing: Vec<String>, new: Vec<String>) -> Vec<String> {
    for item in new {
        if !existing.contains(&item) {
            existing.push(item);
        }
    }
    existing
}

/// Sorted set union of both lists.
fn union_sorted(mut existing: Vec<String>, new: Vec<String>) -> Vec<String> {
    existing.extend(new);
    existing.sort_unstable();
    existing.dedup();
    existing
}
