//! Window scoring: three sub-scores combined as a fixed weighted sum.
//!
//! | Sub-score | Weight | Definition |
//! |-----------|--------|------------|
//! | word overlap | 0.5 | `|set ∩ set| / max(|set|, |set|)` over the token sets |
//! | sequence similarity | 0.3 | `1 − levenshtein / max(len, len)` over the joined texts |
//! | length ratio | 0.2 | `min(len, len) / max(len, len)` over the joined texts |
//!
//! All lengths are in chars of the normalized strings. Every sub-score and
//! the combination is deterministic and lies in `[0, 1]`.

use std::collections::HashSet;

/// Weights for the three sub-scores. They are expected to sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub overlap: f64,
    pub sequence: f64,
    pub length: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            overlap: 0.5,
            sequence: 0.3,
            length: 0.2,
        }
    }
}

/// Combined match score for one window against the target phrase.
///
/// `target_tokens`/`window_tokens` are the per-token normalized strings
/// (window tokens may contain empty placeholders for words that
/// normalized to nothing); `target_text`/`window_text` are the same
/// tokens joined with single spaces.
pub fn match_score(
    weights: ScoreWeights,
    target_text: &str,
    window_text: &str,
    target_tokens: &[&str],
    window_tokens: &[&str],
) -> f64 {
    let overlap = word_overlap(target_tokens, window_tokens);
    let sequence = sequence_similarity(target_text, window_text);
    let length = length_ratio(target_text, window_text);

    weights.overlap * overlap + weights.sequence * sequence + weights.length * length
}

/// Set-based token overlap: duplicates collapse, order is ignored.
pub fn word_overlap(a: &[&str], b: &[&str]) -> f64 {
    let set_a: HashSet<&str> = a.iter().copied().collect();
    let set_b: HashSet<&str> = b.iter().copied().collect();
    let max_len = set_a.len().max(set_b.len());
    if max_len == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / max_len as f64
}

/// `1 − normalized edit distance`. Two empty strings are identical (1.0).
pub fn sequence_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// `min(len, len) / max(len, len)`; defined as 1.0 when both are empty.
pub fn length_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        return 1.0;
    }
    len_a.min(len_b) as f64 / max_len as f64
}

/// Character-level Levenshtein distance with unit costs.
///
/// Rolling two-row table: only the previous row is ever consulted, so
/// memory is `O(min(len, len))` instead of the full matrix.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Iterate the longer string, keep rows sized by the shorter one.
    let (outer, inner) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };

    let mut prev: Vec<usize> = (0..=inner.len()).collect();
    let mut cur = vec![0usize; inner.len() + 1];

    for (i, &oc) in outer.iter().enumerate() {
        cur[0] = i + 1;
        for (j, &ic) in inner.iter().enumerate() {
            let cost = usize::from(oc != ic);
            cur[j + 1] = (prev[j + 1] + 1).min(cur[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[inner.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn levenshtein_classic_cases() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("same", "same"), 0);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn levenshtein_is_symmetric() {
        assert_eq!(levenshtein("valley", "distant"), levenshtein("distant", "valley"));
    }

    #[test]
    fn overlap_collapses_duplicates() {
        // {the, cat} vs {the, cat}; repeats on either side do not inflate.
        let a = ["the", "cat", "the"];
        let b = ["cat", "the"];
        assert_relative_eq!(word_overlap(&a, &b), 1.0);
    }

    #[test]
    fn overlap_uses_larger_set_as_denominator() {
        let a = ["a", "b", "c", "d"];
        let b = ["a", "b"];
        assert_relative_eq!(word_overlap(&a, &b), 0.5);
    }

    #[test]
    fn overlap_of_disjoint_sets_is_zero() {
        assert_relative_eq!(word_overlap(&["x"], &["y"]), 0.0);
    }

    #[test]
    fn sequence_similarity_of_empty_pair_is_one() {
        assert_relative_eq!(sequence_similarity("", ""), 1.0);
        assert_relative_eq!(sequence_similarity("abcd", ""), 0.0);
    }

    #[test]
    fn length_ratio_bounds() {
        assert_relative_eq!(length_ratio("", ""), 1.0);
        assert_relative_eq!(length_ratio("ab", "abcd"), 0.5);
        assert_relative_eq!(length_ratio("abcd", "ab"), 0.5);
    }

    #[test]
    fn identical_texts_score_one() {
        let tokens = ["the", "quick", "brown"];
        let score = match_score(
            ScoreWeights::default(),
            "the quick brown",
            "the quick brown",
            &tokens,
            &tokens,
        );
        assert_relative_eq!(score, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn disjoint_texts_score_low() {
        let score = match_score(
            ScoreWeights::default(),
            "a spaceship flies",
            "the quick brown",
            &["a", "spaceship", "flies"],
            &["the", "quick", "brown"],
        );
        assert!(score < 0.4, "score={score}");
    }
}
