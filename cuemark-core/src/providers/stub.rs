//! Stub providers: deterministic placeholders with no network access.
//!
//! Used when no API keys are configured, and by tests that exercise the
//! pipeline end-to-end without external services.

use tracing::debug;

use crate::cue::{CueIntensity, SoundCue};
use crate::error::Result;
use crate::providers::{CueGenerator, SoundSynthesizer, SynthesizedSound, Transcriber};
use crate::transcript::{TimestampedWord, Transcript};

/// Returns a fixed five-word transcript regardless of the audio URL.
#[derive(Debug, Default)]
pub struct StubTranscriber;

impl Transcriber for StubTranscriber {
    fn transcribe(&self, audio_url: &str) -> Result<Transcript> {
        debug!(audio_url, "StubTranscriber returning canned transcript");
        let words = vec![
            TimestampedWord::new("the", 0.0, 0.4),
            TimestampedWord::new("storm", 0.4, 0.9),
            TimestampedWord::new("rolled", 0.9, 1.3),
            TimestampedWord::new("in", 1.3, 1.5),
            TimestampedWord::new("quickly", 1.5, 2.1),
        ];
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(Transcript { text, words })
    }
}

/// Proposes one cue quoting the start of the transcription.
#[derive(Debug, Default)]
pub struct StubCueGenerator;

impl CueGenerator for StubCueGenerator {
    fn generate(&self, transcription: &str) -> Result<Vec<SoundCue>> {
        debug!(
            chars = transcription.len(),
            "StubCueGenerator returning canned cue"
        );
        let position = transcription
            .split_whitespace()
            .take(3)
            .collect::<Vec<_>>()
            .join(" ");
        Ok(vec![SoundCue {
            description: "distant thunder rumble".into(),
            position,
            duration: 5.0,
            intensity: CueIntensity::Background,
        }])
    }
}

/// Returns a tiny silent placeholder instead of real audio.
#[derive(Debug, Default)]
pub struct StubSynthesizer;

impl SoundSynthesizer for StubSynthesizer {
    fn synthesize(&self, description: &str, duration_seconds: f64) -> Result<SynthesizedSound> {
        debug!(
            description,
            duration_seconds, "StubSynthesizer returning placeholder audio"
        );
        Ok(SynthesizedSound {
            audio_base64: "data:audio/mpeg;base64,".into(),
        })
    }
}
