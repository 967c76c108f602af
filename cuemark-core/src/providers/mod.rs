//! Collaborator abstractions.
//!
//! The three traits decouple the pipeline from any specific service:
//! speech-to-text, cue generation, and sound synthesis are all external
//! black boxes behind these seams. Implementations are synchronous and
//! perform blocking I/O; callers embedding them in an async runtime run
//! them under `spawn_blocking`.
//!
//! `&self` throughout: providers hold no per-call state, so one instance
//! can serve independent calls from parallel callers.

pub mod stub;

#[cfg(feature = "cloud")]
pub mod elevenlabs;
#[cfg(feature = "cloud")]
pub mod openai;

#[cfg(feature = "cloud")]
pub use elevenlabs::ElevenLabsSynthesizer;
#[cfg(feature = "cloud")]
pub use openai::{OpenAiCueGenerator, WhisperApiTranscriber};

use serde::{Deserialize, Serialize};

use crate::cue::SoundCue;
use crate::error::Result;
use crate::transcript::Transcript;

/// Speech-to-text collaborator: audio in, word-level timestamps out.
pub trait Transcriber: Send + Sync {
    /// Fetch the audio behind `audio_url` and transcribe it.
    ///
    /// # Errors
    /// `CuemarkError::AudioFetch` when the audio cannot be retrieved,
    /// `CuemarkError::Transcription` when the service call fails.
    fn transcribe(&self, audio_url: &str) -> Result<Transcript>;
}

/// Cue-generation collaborator: transcript text in, proposed cues out.
pub trait CueGenerator: Send + Sync {
    fn generate(&self, transcription: &str) -> Result<Vec<SoundCue>>;
}

/// Sound-synthesis collaborator: description in, playable audio out.
pub trait SoundSynthesizer: Send + Sync {
    fn synthesize(&self, description: &str, duration_seconds: f64) -> Result<SynthesizedSound>;
}

/// Synthesized audio, ready for an `<audio>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedSound {
    /// `data:audio/mpeg;base64,…` URL.
    pub audio_base64: String,
}
