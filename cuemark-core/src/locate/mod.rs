//! Phrase locator: maps an approximately-quoted phrase onto a contiguous
//! run of timestamped transcript words.
//!
//! ## Algorithm
//!
//! 1. Normalize the phrase into tokens `P`; empty → unmatched.
//! 2. Normalize every transcript word independently. A word that
//!    normalizes to nothing keeps an empty-string slot so indices stay
//!    aligned 1:1 with the word list.
//! 3. Derive descending window sizes from `|P|`: `|P|`, `⌊0.8·|P|⌋`,
//!    `⌊0.6·|P|⌋`, then a 3-word context floor.
//! 4. For each size, largest first, slide over every start index, score
//!    the window (see [`score`]), and keep the first-seen best.
//! 5. Accept the first size whose best clears the acceptance threshold
//!    and return the `start` of the window's first word. Smaller sizes
//!    are never tried after an acceptance.
//!
//! Trying the exact length first biases toward precise alignment; the
//! search only broadens (trading precision for recall) when stricter
//! sizes fail. A non-match is a normal outcome, not an error.

pub mod normalize;
pub mod score;

pub use normalize::{normalize_text, tokenize};
pub use score::ScoreWeights;

use crate::transcript::TimestampedWord;

/// Tuning knobs for [`PhraseLocator`].
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Score at or above which a window is accepted. Default: 0.70.
    pub acceptance_threshold: f64,
    /// Smallest window ever tried, regardless of phrase length. Default: 3.
    pub min_context_window: usize,
    /// Sub-score weights. Default: overlap 0.5, sequence 0.3, length 0.2.
    pub weights: ScoreWeights,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.70,
            min_context_window: 3,
            weights: ScoreWeights::default(),
        }
    }
}

/// A successful location: the winning window and its score.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseMatch {
    /// Playback time in seconds, the `start` of the window's first word.
    pub start: f64,
    /// Index of the window's first word in the transcript word list.
    pub window_start_index: usize,
    /// Number of consecutive words in the winning window.
    pub window_len: usize,
    /// Combined score in `[0, 1]`.
    pub score: f64,
    /// The window's *original* (un-normalized) words joined with spaces.
    pub matched_text: String,
}

/// Best candidate seen for one window size.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowCandidate {
    pub start_index: usize,
    pub score: f64,
    pub matched_text: String,
}

/// One pass of the size ladder, recorded for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPass {
    pub window_size: usize,
    pub windows_scored: usize,
    pub best: Option<WindowCandidate>,
    pub accepted: bool,
}

/// Structured trace of a locate call. Replaces ad-hoc logging inside the
/// scoring loops so tests can assert on what was evaluated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocateTrace {
    pub normalized_phrase: String,
    pub passes: Vec<WindowPass>,
}

/// Pure, synchronous phrase locator. Stateless between calls, so safe to
/// share and to invoke from parallel callers over the same transcript.
#[derive(Debug, Clone, Default)]
pub struct PhraseLocator {
    config: LocatorConfig,
}

impl PhraseLocator {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Locate `phrase` in `words`. `None` means no window cleared the
    /// acceptance threshold at any size, which is a normal outcome.
    pub fn locate(&self, phrase: &str, words: &[TimestampedWord]) -> Option<PhraseMatch> {
        self.locate_traced(phrase, words).0
    }

    /// Like [`locate`](Self::locate), also returning the evaluation trace.
    pub fn locate_traced(
        &self,
        phrase: &str,
        words: &[TimestampedWord],
    ) -> (Option<PhraseMatch>, LocateTrace) {
        let target_text = normalize_text(phrase);
        let target_tokens: Vec<&str> = target_text.split_whitespace().collect();

        let mut trace = LocateTrace {
            normalized_phrase: target_text.clone(),
            passes: Vec::new(),
        };

        if target_tokens.is_empty() || words.is_empty() {
            return (None, trace);
        }

        // Parallel array: normalized_words[i] always resolves back to
        // words[i], including empty placeholders.
        let normalized_words: Vec<String> =
            words.iter().map(|w| normalize_text(&w.text)).collect();

        for window_size in window_sizes(target_tokens.len(), self.config.min_context_window) {
            let mut best: Option<WindowCandidate> = None;
            let mut windows_scored = 0usize;

            if window_size <= words.len() {
                for start in 0..=(words.len() - window_size) {
                    let window_norm = &normalized_words[start..start + window_size];
                    let window_text = window_norm.join(" ");
                    let window_tokens: Vec<&str> =
                        window_norm.iter().map(String::as_str).collect();

                    let candidate_score = score::match_score(
                        self.config.weights,
                        &target_text,
                        &window_text,
                        &target_tokens,
                        &window_tokens,
                    );
                    windows_scored += 1;

                    // Strict `>` so the lowest index wins score ties.
                    if best.as_ref().is_none_or(|b| candidate_score > b.score) {
                        let matched_text = words[start..start + window_size]
                            .iter()
                            .map(|w| w.text.as_str())
                            .collect::<Vec<_>>()
                            .join(" ");
                        best = Some(WindowCandidate {
                            start_index: start,
                            score: candidate_score,
                            matched_text,
                        });
                    }
                }
            }

            let winner = best
                .clone()
                .filter(|b| b.score >= self.config.acceptance_threshold);

            trace.passes.push(WindowPass {
                window_size,
                windows_scored,
                best,
                accepted: winner.is_some(),
            });

            if let Some(winner) = winner {
                let matched = PhraseMatch {
                    start: words[winner.start_index].start,
                    window_start_index: winner.start_index,
                    window_len: window_size,
                    score: winner.score,
                    matched_text: winner.matched_text,
                };
                return (Some(matched), trace);
            }
        }

        (None, trace)
    }
}

/// Candidate window sizes derived from the phrase token count.
///
/// Raw ladder `[n, ⌊0.8n⌋, ⌊0.6n⌋, floor]`; an entry survives iff it is
/// positive and strictly smaller than the *previous raw entry*, which both
/// bounds the pass count and guarantees the result is strictly decreasing.
fn window_sizes(phrase_len: usize, min_context_window: usize) -> Vec<usize> {
    let raw = [
        phrase_len,
        (phrase_len as f64 * 0.8).floor() as usize,
        (phrase_len as f64 * 0.6).floor() as usize,
        min_context_window,
    ];

    let mut sizes = Vec::with_capacity(raw.len());
    for (i, &size) in raw.iter().enumerate() {
        if size > 0 && (i == 0 || size < raw[i - 1]) {
            sizes.push(size);
        }
    }
    sizes
}
