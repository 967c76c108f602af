//! # cuemark-core
//!
//! Sound-cue planning engine for transcribed audio.
//!
//! ## Architecture
//!
//! ```text
//! audio URL → Transcriber → Transcript { text, words[start,end] }
//!                                │
//!                    CueGenerator → Vec<SoundCue { position, … }>
//!                                │
//!          PhraseLocator(position, words) → PlacedCue { timestamp? }
//!                                │
//!              SoundSynthesizer → data:audio/mpeg;base64,…
//! ```
//!
//! The hard core is the [`locate::PhraseLocator`]: cue positions quote the
//! transcript only approximately (casing, punctuation, diacritics,
//! paraphrase), so each one is fuzzy-matched back onto a contiguous run of
//! timestamped words. The locator is pure and stateless; everything with a
//! network dependency sits behind the [`providers`] traits.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod cue;
pub mod error;
pub mod locate;
pub mod pipeline;
pub mod providers;
pub mod transcript;

// Convenience re-exports for downstream crates
pub use cue::{CueIntensity, CueSheet, PlacedCue, SoundCue};
pub use error::CuemarkError;
pub use locate::{LocateTrace, LocatorConfig, PhraseLocator, PhraseMatch};
pub use pipeline::{CuePipeline, CueSession, DiagnosticsSnapshot};
pub use providers::{CueGenerator, SoundSynthesizer, SynthesizedSound, Transcriber};
pub use transcript::{format_timestamp, TimestampedWord, Transcript};

#[cfg(feature = "cloud")]
pub use providers::{ElevenLabsSynthesizer, OpenAiCueGenerator, WhisperApiTranscriber};
