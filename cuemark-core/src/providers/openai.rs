//! OpenAI-backed providers: Whisper transcription and chat-based cue
//! generation.
//!
//! Transcription posts the fetched audio as multipart form data with
//! `response_format=verbose_json` and word-level timestamp granularity;
//! the only response shape that carries per-word times. Cue generation
//! forces a `generate_sound_effects` function call so the model's output
//! arrives as structured JSON rather than prose.

use std::time::Duration;

use reqwest::blocking::multipart;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::cue::SoundCue;
use crate::error::{CuemarkError, Result};
use crate::providers::{CueGenerator, Transcriber};
use crate::transcript::{TimestampedWord, Transcript};

const TRANSCRIPTION_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const CHAT_MODEL: &str = "gpt-4o";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const CUE_SYSTEM_PROMPT: &str = "You are a creative sound designer specializing in children's \
     content. Generate engaging sound effects for a children's podcast.";

/// A blank key would only fail at request time with an opaque 401;
/// reject it up front instead.
fn require_key(api_key: String) -> Result<String> {
    if api_key.trim().is_empty() {
        return Err(CuemarkError::MissingApiKey("OPENAI_API_KEY"));
    }
    Ok(api_key)
}

fn build_client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| CuemarkError::Other(anyhow::anyhow!("http client build failed: {e}")))
}

/// Pull a human-readable message out of an OpenAI error body, falling
/// back to the HTTP status.
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}

// ---------------------------------------------------------------------------
// Whisper transcription
// ---------------------------------------------------------------------------

/// Word-level transcription via the hosted Whisper API.
#[derive(Debug)]
pub struct WhisperApiTranscriber {
    api_key: String,
    client: reqwest::blocking::Client,
}

impl WhisperApiTranscriber {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_key: require_key(api_key.into())?,
            client: build_client()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    text: String,
    #[serde(default)]
    words: Vec<TimestampedWord>,
}

fn parse_verbose_transcription(body: &str) -> Result<Transcript> {
    let parsed: VerboseTranscription = serde_json::from_str(body)
        .map_err(|e| CuemarkError::MalformedResponse(format!("verbose_json parse: {e}")))?;
    Ok(Transcript {
        text: parsed.text,
        words: parsed.words,
    })
}

impl Transcriber for WhisperApiTranscriber {
    fn transcribe(&self, audio_url: &str) -> Result<Transcript> {
        info!(audio_url, "fetching audio for transcription");

        let audio_response = self
            .client
            .get(audio_url)
            .send()
            .map_err(|e| CuemarkError::AudioFetch(e.to_string()))?;
        if !audio_response.status().is_success() {
            return Err(CuemarkError::AudioFetch(format!(
                "HTTP {}",
                audio_response.status()
            )));
        }
        let content_type = audio_response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();
        let audio_bytes = audio_response
            .bytes()
            .map_err(|e| CuemarkError::AudioFetch(e.to_string()))?;

        debug!(
            bytes = audio_bytes.len(),
            content_type, "audio fetched, posting to transcription API"
        );

        let file_part = multipart::Part::bytes(audio_bytes.to_vec())
            .file_name("audio.mp3")
            .mime_str(&content_type)
            .map_err(|e| CuemarkError::Transcription(format!("multipart file part: {e}")))?;
        let form = multipart::Form::new()
            .text("model", "whisper-1")
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word")
            .part("file", file_part);

        let response = self
            .client
            .post(TRANSCRIPTION_URL)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .map_err(|e| CuemarkError::Transcription(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| CuemarkError::Transcription(e.to_string()))?;
        if !status.is_success() {
            warn!(%status, "transcription request failed");
            return Err(CuemarkError::Transcription(api_error_message(
                status, &body,
            )));
        }

        let transcript = parse_verbose_transcription(&body)?;
        info!(
            words = transcript.words.len(),
            chars = transcript.text.len(),
            "transcription received"
        );
        Ok(transcript)
    }
}

// ---------------------------------------------------------------------------
// Cue generation
// ---------------------------------------------------------------------------

/// Sound-cue proposals via a forced chat function call.
#[derive(Debug)]
pub struct OpenAiCueGenerator {
    api_key: String,
    client: reqwest::blocking::Client,
}

impl OpenAiCueGenerator {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_key: require_key(api_key.into())?,
            client: build_client()?,
        })
    }

    fn request_body(transcription: &str) -> serde_json::Value {
        json!({
            "model": CHAT_MODEL,
            "messages": [
                { "role": "system", "content": CUE_SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!(
                        "Generate more than 10 sound effects for this podcast transcript. \
                         For each sound effect, specify:\n\
                         1. A clear description of the sound.\n\
                         2. A unique phrase or sentence where the sound effect should be added.\n\
                         3. How long it should play.\n\
                         4. Whether it should be in the background or foreground.\n\n\
                         Transcription:\n\"\"\"\n{transcription}\n\"\"\""
                    ),
                },
            ],
            "functions": [{
                "name": "generate_sound_effects",
                "description": "Generates sound effects for a podcast based on the transcription.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "sound_effects": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "description": {
                                        "type": "string",
                                        "description": "A short description of the sound effect."
                                    },
                                    "position": {
                                        "type": "string",
                                        "description": "A unique phrase or sentence where the sound effect should be added."
                                    },
                                    "duration": {
                                        "type": "number",
                                        "description": "How long the sound effect should play in seconds."
                                    },
                                    "intensity": {
                                        "type": "string",
                                        "enum": ["background", "foreground"],
                                        "description": "Whether the sound should be played in the background or foreground."
                                    }
                                },
                                "required": ["description", "position", "duration", "intensity"]
                            }
                        }
                    },
                    "required": ["sound_effects"]
                }
            }],
            "function_call": { "name": "generate_sound_effects" },
            "temperature": 0.7,
        })
    }
}

#[derive(Debug, Deserialize)]
struct FunctionArguments {
    sound_effects: Vec<SoundCue>,
}

/// Extract the forced function call's arguments from a chat completion
/// response and parse them into cues.
fn parse_cue_response(body: &str) -> Result<Vec<SoundCue>> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| CuemarkError::MalformedResponse(format!("chat completion parse: {e}")))?;

    let arguments = value
        .pointer("/choices/0/message/function_call/arguments")
        .and_then(|a| a.as_str())
        .ok_or_else(|| {
            CuemarkError::MalformedResponse("no function arguments in chat completion".into())
        })?;

    let parsed: FunctionArguments = serde_json::from_str(arguments)
        .map_err(|e| CuemarkError::MalformedResponse(format!("function arguments parse: {e}")))?;
    Ok(parsed.sound_effects)
}

impl CueGenerator for OpenAiCueGenerator {
    fn generate(&self, transcription: &str) -> Result<Vec<SoundCue>> {
        info!(chars = transcription.len(), "requesting sound-effect cues");

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&Self::request_body(transcription))
            .send()
            .map_err(|e| CuemarkError::CueGeneration(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| CuemarkError::CueGeneration(e.to_string()))?;
        if !status.is_success() {
            warn!(%status, "cue generation request failed");
            return Err(CuemarkError::CueGeneration(api_error_message(
                status, &body,
            )));
        }

        let cues = parse_cue_response(&body)?;
        info!(cues = cues.len(), "cue proposals received");
        Ok(cues)
    }
}
