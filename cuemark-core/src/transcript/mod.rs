//! Transcript data model.
//!
//! The transcription collaborator returns word-level timestamps in the
//! Whisper `verbose_json` wire shape:
//!
//! ```json
//! { "text": "…", "words": [{ "word": "the", "start": 0.0, "end": 0.5 }] }
//! ```
//!
//! Words are in transcript order; `start` is non-decreasing and is never
//! re-sorted here. Times are seconds, not milliseconds.

use serde::{Deserialize, Serialize};

/// A single transcript word with its playback interval in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedWord {
    /// Source word text, exactly as the transcription service produced it
    /// (may carry punctuation, casing, diacritics).
    #[serde(rename = "word")]
    pub text: String,
    /// Start of the word in seconds. `start <= end`.
    pub start: f64,
    /// End of the word in seconds.
    pub end: f64,
}

impl TimestampedWord {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Full transcription result: flat text plus the timestamped word list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    /// The whole transcription as one string.
    #[serde(rename = "transcription")]
    pub text: String,
    /// Word-level timestamps, in transcript order.
    pub words: Vec<TimestampedWord>,
}

/// Render a time in seconds as `MM:SS.ss` for logs and display.
///
/// `75.5` → `"01:15.50"`.
pub fn format_timestamp(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as u64;
    let remaining = seconds - (minutes as f64) * 60.0;
    format!("{minutes:02}:{remaining:05.2}")
}
