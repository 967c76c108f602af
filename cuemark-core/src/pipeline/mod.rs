//! `CuePipeline` ties the collaborators and the locator together.
//!
//! ## Stages
//!
//! ```text
//! audio URL ──► Transcriber ──► Transcript { text, words }
//! transcript text ──► CueGenerator ──► Vec<SoundCue>
//! cue.position × words ──► PhraseLocator ──► PlacedCue { timestamp? }
//! cue.description ──► SoundSynthesizer ──► data:audio/mpeg;base64,…
//! ```
//!
//! Every stage is synchronous; async callers run pipeline methods under
//! `spawn_blocking`. Cues are independent of one another, so callers may
//! also fan mapping out across threads; the locator is stateless and
//! read-only over the shared transcript.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cue::{CueSheet, PlacedCue};
use crate::error::Result;
use crate::locate::PhraseLocator;
use crate::providers::{CueGenerator, SoundSynthesizer, SynthesizedSound, Transcriber};
use crate::transcript::{format_timestamp, Transcript};

/// Shared stage counters for observability.
#[derive(Debug, Default)]
pub struct PipelineDiagnostics {
    pub transcribe_calls: AtomicUsize,
    pub cue_batches: AtomicUsize,
    pub cues_generated: AtomicUsize,
    pub cues_matched: AtomicUsize,
    pub cues_unmatched: AtomicUsize,
    pub sounds_synthesized: AtomicUsize,
    pub provider_errors: AtomicUsize,
}

impl PipelineDiagnostics {
    pub fn reset(&self) {
        self.transcribe_calls.store(0, Ordering::Relaxed);
        self.cue_batches.store(0, Ordering::Relaxed);
        self.cues_generated.store(0, Ordering::Relaxed);
        self.cues_matched.store(0, Ordering::Relaxed);
        self.cues_unmatched.store(0, Ordering::Relaxed);
        self.sounds_synthesized.store(0, Ordering::Relaxed);
        self.provider_errors.store(0, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            transcribe_calls: self.transcribe_calls.load(Ordering::Relaxed),
            cue_batches: self.cue_batches.load(Ordering::Relaxed),
            cues_generated: self.cues_generated.load(Ordering::Relaxed),
            cues_matched: self.cues_matched.load(Ordering::Relaxed),
            cues_unmatched: self.cues_unmatched.load(Ordering::Relaxed),
            sounds_synthesized: self.sounds_synthesized.load(Ordering::Relaxed),
            provider_errors: self.provider_errors.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsSnapshot {
    pub transcribe_calls: usize,
    pub cue_batches: usize,
    pub cues_generated: usize,
    pub cues_matched: usize,
    pub cues_unmatched: usize,
    pub sounds_synthesized: usize,
    pub provider_errors: usize,
}

/// A full pipeline run: the transcript and the cues planned against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CueSession {
    pub transcript: Transcript,
    pub cues: CueSheet,
}

pub struct CuePipeline {
    transcriber: Arc<dyn Transcriber>,
    cue_generator: Arc<dyn CueGenerator>,
    synthesizer: Arc<dyn SoundSynthesizer>,
    locator: PhraseLocator,
    diagnostics: Arc<PipelineDiagnostics>,
}

impl CuePipeline {
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        cue_generator: Arc<dyn CueGenerator>,
        synthesizer: Arc<dyn SoundSynthesizer>,
        locator: PhraseLocator,
    ) -> Self {
        Self {
            transcriber,
            cue_generator,
            synthesizer,
            locator,
            diagnostics: Arc::new(PipelineDiagnostics::default()),
        }
    }

    /// Transcribe the audio behind `audio_url` into timestamped words.
    pub fn transcribe(&self, audio_url: &str) -> Result<Transcript> {
        self.diagnostics
            .transcribe_calls
            .fetch_add(1, Ordering::Relaxed);

        let transcript = self.transcriber.transcribe(audio_url).inspect_err(|e| {
            self.diagnostics
                .provider_errors
                .fetch_add(1, Ordering::Relaxed);
            warn!(error = %e, "transcription failed");
        })?;

        info!(
            words = transcript.words.len(),
            "transcript ready for cue planning"
        );
        Ok(transcript)
    }

    /// Generate cues for the transcript and anchor each one in time.
    ///
    /// Cues whose position phrase cannot be located stay in the sheet with
    /// `timestamp: None`; that is a normal outcome the caller must render
    /// as "not found", never as time zero.
    pub fn plan(&self, transcript: &Transcript) -> Result<CueSheet> {
        self.diagnostics.cue_batches.fetch_add(1, Ordering::Relaxed);

        let cues = self.cue_generator.generate(&transcript.text).inspect_err(|e| {
            self.diagnostics
                .provider_errors
                .fetch_add(1, Ordering::Relaxed);
            warn!(error = %e, "cue generation failed");
        })?;
        self.diagnostics
            .cues_generated
            .fetch_add(cues.len(), Ordering::Relaxed);

        let placed: Vec<PlacedCue> = cues
            .into_iter()
            .map(|cue| match self.locator.locate(&cue.position, &transcript.words) {
                Some(found) => {
                    info!(
                        position = %cue.position,
                        matched_text = %found.matched_text,
                        score = format_args!("{:.3}", found.score),
                        timestamp = %format_timestamp(found.start),
                        "cue anchored"
                    );
                    self.diagnostics
                        .cues_matched
                        .fetch_add(1, Ordering::Relaxed);
                    PlacedCue::matched(cue, &found)
                }
                None => {
                    warn!(position = %cue.position, "no sufficient match for cue position");
                    self.diagnostics
                        .cues_unmatched
                        .fetch_add(1, Ordering::Relaxed);
                    PlacedCue::unmatched(cue)
                }
            })
            .collect();

        let sheet = CueSheet::new(placed);
        info!(
            cues = sheet.cues.len(),
            matched = sheet.matched,
            unmatched = sheet.unmatched,
            "cue sheet planned"
        );
        Ok(sheet)
    }

    /// Synthesize playable audio for one cue description.
    pub fn synthesize(&self, description: &str, duration_seconds: f64) -> Result<SynthesizedSound> {
        let sound = self
            .synthesizer
            .synthesize(description, duration_seconds)
            .inspect_err(|e| {
                self.diagnostics
                    .provider_errors
                    .fetch_add(1, Ordering::Relaxed);
                warn!(error = %e, "sound synthesis failed");
            })?;
        self.diagnostics
            .sounds_synthesized
            .fetch_add(1, Ordering::Relaxed);
        Ok(sound)
    }

    /// Convenience: transcribe then plan in one call.
    pub fn run(&self, audio_url: &str) -> Result<CueSession> {
        let transcript = self.transcribe(audio_url)?;
        let cues = self.plan(&transcript)?;
        Ok(CueSession { transcript, cues })
    }

    pub fn diagnostics(&self) -> DiagnosticsSnapshot {
        self.diagnostics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cue::{CueIntensity, SoundCue};
    use crate::error::CuemarkError;
    use crate::providers::stub::{StubSynthesizer, StubTranscriber};
    use crate::transcript::TimestampedWord;

    struct ScriptedCueGenerator {
        cues: Vec<SoundCue>,
    }

    impl CueGenerator for ScriptedCueGenerator {
        fn generate(&self, _transcription: &str) -> Result<Vec<SoundCue>> {
            Ok(self.cues.clone())
        }
    }

    struct FailingCueGenerator;

    impl CueGenerator for FailingCueGenerator {
        fn generate(&self, _transcription: &str) -> Result<Vec<SoundCue>> {
            Err(CuemarkError::CueGeneration("intentional test failure".into()))
        }
    }

    fn cue(position: &str) -> SoundCue {
        SoundCue {
            description: "swoosh".into(),
            position: position.into(),
            duration: 2.0,
            intensity: CueIntensity::Foreground,
        }
    }

    fn transcript() -> Transcript {
        let words = vec![
            TimestampedWord::new("the", 0.0, 0.4),
            TimestampedWord::new("storm", 0.4, 0.9),
            TimestampedWord::new("rolled", 0.9, 1.3),
            TimestampedWord::new("in", 1.3, 1.5),
            TimestampedWord::new("quickly", 1.5, 2.1),
        ];
        Transcript {
            text: "the storm rolled in quickly".into(),
            words,
        }
    }

    fn pipeline(generator: Arc<dyn CueGenerator>) -> CuePipeline {
        CuePipeline::new(
            Arc::new(StubTranscriber),
            generator,
            Arc::new(StubSynthesizer),
            PhraseLocator::default(),
        )
    }

    #[test]
    fn plan_anchors_matching_cues_and_keeps_unmatched_ones() {
        let generator = Arc::new(ScriptedCueGenerator {
            cues: vec![cue("The Storm rolled in!"), cue("a spaceship flies past")],
        });
        let pipeline = pipeline(generator);

        let sheet = pipeline.plan(&transcript()).expect("plan succeeds");
        assert_eq!(sheet.cues.len(), 2);
        assert_eq!(sheet.matched, 1);
        assert_eq!(sheet.unmatched, 1);

        let anchored = &sheet.cues[0];
        let ts = anchored.timestamp.expect("first cue is anchored");
        assert!((ts - 0.0).abs() < 1e-9);
        assert_eq!(anchored.matched_text.as_deref(), Some("the storm rolled in"));

        let missed = &sheet.cues[1];
        assert!(missed.timestamp.is_none());
        assert!(missed.match_score.is_none());
    }

    #[test]
    fn diagnostics_track_every_stage() {
        let generator = Arc::new(ScriptedCueGenerator {
            cues: vec![cue("the storm rolled"), cue("nothing like this at all")],
        });
        let pipeline = pipeline(generator);

        let session = pipeline.run("https://example.com/episode.mp3").unwrap();
        assert_eq!(session.cues.matched, 1);

        pipeline.synthesize("swoosh", 2.0).unwrap();

        let snap = pipeline.diagnostics();
        assert_eq!(snap.transcribe_calls, 1);
        assert_eq!(snap.cue_batches, 1);
        assert_eq!(snap.cues_generated, 2);
        assert_eq!(snap.cues_matched, 1);
        assert_eq!(snap.cues_unmatched, 1);
        assert_eq!(snap.sounds_synthesized, 1);
        assert_eq!(snap.provider_errors, 0);
    }

    #[test]
    fn provider_failure_surfaces_and_is_counted() {
        let pipeline = pipeline(Arc::new(FailingCueGenerator));

        let err = pipeline.plan(&transcript()).unwrap_err();
        assert!(matches!(err, CuemarkError::CueGeneration(_)));
        assert_eq!(pipeline.diagnostics().provider_errors, 1);
        assert_eq!(pipeline.diagnostics().cues_generated, 0);
    }
}
