use std::collections::HashMap;

use crate::normalize::normalize;

/// Weight of the letter-multiset overlap in the blended score.
pub const LETTER_WEIGHT: f64 = 0.5;

/// Weight of the sequence-alignment ratio in the blended score.
pub const SEQUENCE_WEIGHT: f64 = 0.5;

/// Second sequences at least this long get the popular-element heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Blended similarity (0.0–1.0) between two strings after normalization.
pub fn similarity(a: &str, b: &str) -> f64 {
    LETTER_WEIGHT * letter_similarity(a, b) + SEQUENCE_WEIGHT * sequence_similarity(a, b)
}

/// Share of letters the two normalized strings have in common.
///
/// Counts the multiset intersection and divides by the longer length, so
/// anagrams score 1.0 and extra letters on either side pull the score down.
pub fn letter_similarity(a: &str, b: &str) -> f64 {
    let na: Vec<char> = normalize(a).chars().collect();
    let nb: Vec<char> = normalize(b).chars().collect();

    match (na.is_empty(), nb.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for &c in &na {
        *counts.entry(c).or_insert(0) += 1;
    }

    let mut common = 0usize;
    for c in &nb {
        if let Some(n) = counts.get_mut(c) {
            if *n > 0 {
                *n -= 1;
                common += 1;
            }
        }
    }

    common as f64 / na.len().max(nb.len()) as f64
}

/// Ratcliff/Obershelp ratio of the two normalized strings: `2*M / T`.
pub fn sequence_similarity(a: &str, b: &str) -> f64 {
    let na: Vec<char> = normalize(a).chars().collect();
    let nb: Vec<char> = normalize(b).chars().collect();
    SequenceMatcher::new(&na, &nb).ratio()
}

/// Longest-matching-block aligner over two char sequences.
///
/// `b` is indexed once up front; blocks are searched leftmost-first so the
/// earliest longest block in `a` wins ties.
struct SequenceMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        // Elements filling more than 1% of a long `b` are never block seeds.
        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|&(_, _, k)| k).sum();
        2.0 * matched as f64 / total as f64
    }

    /// All matching blocks as `(i, j, size)`, sorted by position.
    fn matching_blocks(&self) -> Vec<(usize, usize, usize)> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            blocks.push((i, j, k));
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        blocks.sort_unstable();
        blocks
    }

    /// Longest block with `a[i..i+k] == b[j..j+k]` inside the given window.
    fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (a, b) = (self.a, self.b);
        let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0usize);

        // j2len[j] = length of the match ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(c) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best_k {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_k = k;
                    }
                }
            }
            j2len = next;
        }

        // Grow across elements dropped from the index by the popularity rule.
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_k += 1;
        }
        while best_i + best_k < ahi
            && best_j + best_k < bhi
            && a[best_i + best_k] == b[best_j + best_k]
        {
            best_k += 1;
        }

        (best_i, best_j, best_k)
    }
}
