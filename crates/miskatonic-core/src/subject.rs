//! Subject canonicalization against the subjects already seen in a run.
//!
//! The first spelling of a subject becomes its canonical form; later
//! spellings close enough to a known one are folded into it. The scan is
//! greedy and order-dependent: an early typo can become the canonical form.

use indexmap::IndexMap;

use crate::similarity::similarity;

/// Default minimum similarity for folding a subject into a known one.
pub const DEFAULT_THRESHOLD: f64 = 0.90;

/// Canonical subjects seen so far and how often each was used.
///
/// Keys keep insertion order, which decides ties during canonicalization.
#[derive(Debug, Clone, Default)]
pub struct SubjectRegistry {
    counts: IndexMap<String, u64>,
}

impl SubjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.counts.contains_key(subject)
    }

    /// Occurrences recorded for a canonical subject.
    pub fn count(&self, subject: &str) -> u64 {
        self.counts.get(subject).copied().unwrap_or(0)
    }

    /// Canonical subjects in first-seen order.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Count one more use of `subject`, registering it if new.
    pub fn record(&mut self, subject: &str) {
        match self.counts.get_mut(subject) {
            Some(n) => *n += 1,
            None => {
                self.counts.insert(subject.to_string(), 1);
            }
        }
    }
}

/// Map `subject` onto a known canonical subject when one is similar enough.
///
/// Returns the subject to use and whether it differs from the input because
/// of a similarity match. Exact matches are never reported as corrections.
/// Does not touch the registry: callers [`SubjectRegistry::record`] the
/// result themselves.
pub fn canonicalize(subject: &str, registry: &SubjectRegistry, threshold: f64) -> (String, bool) {
    if subject.is_empty() || registry.is_empty() || registry.contains(subject) {
        return (subject.to_string(), false);
    }

    let mut best: Option<&str> = None;
    let mut best_score = 0.0;
    for known in registry.subjects() {
        let score = similarity(subject, known);
        // Strictly greater: the earliest registered subject keeps a tie.
        if score > best_score {
            best_score = score;
            best = Some(known);
        }
    }

    match best {
        Some(known) if best_score >= threshold => {
            tracing::debug!(subject, canonical = known, score = best_score, "Subject corrected");
            (known.to_string(), true)
        }
        _ => (subject.to_string(), false),
    }
}
