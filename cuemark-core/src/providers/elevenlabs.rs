//! ElevenLabs sound-generation backend.
//!
//! One POST per cue; the response is raw MPEG audio, returned to callers
//! as a `data:` URL so it can be handed straight to an `<audio>` element.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;
use tracing::{info, warn};

use crate::error::{CuemarkError, Result};
use crate::providers::{SoundSynthesizer, SynthesizedSound};

const SOUND_GENERATION_URL: &str = "https://api.elevenlabs.io/v1/sound-generation";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct ElevenLabsSynthesizer {
    api_key: String,
    client: reqwest::blocking::Client,
}

impl ElevenLabsSynthesizer {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CuemarkError::MissingApiKey("ELEVEN_LABS_API_KEY"));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CuemarkError::Other(anyhow::anyhow!("http client build failed: {e}")))?;
        Ok(Self { api_key, client })
    }
}

/// Wrap raw MPEG bytes in a browser-playable data URL.
fn to_data_url(audio: &[u8]) -> String {
    format!("data:audio/mpeg;base64,{}", STANDARD.encode(audio))
}

impl SoundSynthesizer for ElevenLabsSynthesizer {
    fn synthesize(&self, description: &str, duration_seconds: f64) -> Result<SynthesizedSound> {
        info!(description, duration_seconds, "generating sound effect");

        let response = self
            .client
            .post(SOUND_GENERATION_URL)
            .header("Accept", "audio/mpeg")
            .header("xi-api-key", &self.api_key)
            .json(&json!({
                "text": description,
                "duration_seconds": duration_seconds,
            }))
            .send()
            .map_err(|e| CuemarkError::SoundSynthesis(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "sound generation request failed");
            return Err(CuemarkError::SoundSynthesis(format!("HTTP {status}")));
        }

        let audio = response
            .bytes()
            .map_err(|e| CuemarkError::SoundSynthesis(e.to_string()))?;
        info!(bytes = audio.len(), "sound effect generated");

        Ok(SynthesizedSound {
            audio_base64: to_data_url(&audio),
        })
    }
}
