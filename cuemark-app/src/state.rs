//! Shared application state handed to every request handler.

use std::sync::Arc;

use cuemark_core::{CuePipeline, Transcript};
use parking_lot::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<CuePipeline>,
    /// Most recent transcript, used when a cue request does not carry its
    /// own transcription text.
    pub transcript: Arc<RwLock<Option<Transcript>>>,
    pub default_sound_duration: f64,
}

impl AppState {
    pub fn new(pipeline: Arc<CuePipeline>, default_sound_duration: f64) -> Self {
        Self {
            pipeline,
            transcript: Arc::new(RwLock::new(None)),
            default_sound_duration,
        }
    }

    pub fn remember_transcript(&self, transcript: Transcript) {
        *self.transcript.write() = Some(transcript);
    }

    pub fn cached_transcript(&self) -> Option<Transcript> {
        self.transcript.read().clone()
    }
}
