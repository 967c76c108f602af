//! HTTP route handlers.
//!
//! Pipeline providers use blocking HTTP clients, so every handler that
//! touches them runs the call under `spawn_blocking`.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use cuemark_core::{CueSheet, CuemarkError, DiagnosticsSnapshot, SynthesizedSound, Transcript};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::ApiError, state::AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/transcribe", post(transcribe))
        .route("/api/cues", post(plan_cues))
        .route("/api/sound", post(synthesize_sound))
        .route("/api/health", get(health))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranscribeRequest {
    audio_url: String,
}

async fn transcribe(
    State(state): State<AppState>,
    Json(req): Json<TranscribeRequest>,
) -> Result<Json<Transcript>, ApiError> {
    if req.audio_url.trim().is_empty() {
        return Err(ApiError::bad_request("audioUrl must not be empty"));
    }

    let pipeline = state.pipeline.clone();
    let transcript = tokio::task::spawn_blocking(move || pipeline.transcribe(&req.audio_url))
        .await
        .map_err(|e| ApiError::internal(format!("transcription task failed: {e}")))??;

    state.remember_transcript(transcript.clone());
    info!(words = transcript.words.len(), "transcript cached");
    Ok(Json(transcript))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanCuesRequest {
    /// Optional replacement text for cue generation. Word timings always
    /// come from the most recent transcription.
    transcription: Option<String>,
}

async fn plan_cues(
    State(state): State<AppState>,
    body: Option<Json<PlanCuesRequest>>,
) -> Result<Json<CueSheet>, ApiError> {
    let mut transcript = state
        .cached_transcript()
        .ok_or(CuemarkError::NoTranscript)?;
    if let Some(Json(req)) = body {
        if let Some(text) = req.transcription.filter(|t| !t.trim().is_empty()) {
            transcript.text = text;
        }
    }

    let pipeline = state.pipeline.clone();
    let sheet = tokio::task::spawn_blocking(move || pipeline.plan(&transcript))
        .await
        .map_err(|e| ApiError::internal(format!("cue planning task failed: {e}")))??;

    Ok(Json(sheet))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SoundRequest {
    text: String,
    duration_seconds: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SoundResponse {
    audio_base64: String,
}

async fn synthesize_sound(
    State(state): State<AppState>,
    Json(req): Json<SoundRequest>,
) -> Result<Json<SoundResponse>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::bad_request("text must not be empty"));
    }
    let duration = req.duration_seconds.unwrap_or(state.default_sound_duration);

    let pipeline = state.pipeline.clone();
    let SynthesizedSound { audio_base64 } =
        tokio::task::spawn_blocking(move || pipeline.synthesize(&req.text, duration))
            .await
            .map_err(|e| ApiError::internal(format!("synthesis task failed: {e}")))??;

    Ok(Json(SoundResponse { audio_base64 }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    diagnostics: DiagnosticsSnapshot,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        diagnostics: state.pipeline.diagnostics(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use cuemark_core::{
        providers::stub::{StubCueGenerator, StubSynthesizer, StubTranscriber},
        CuePipeline, PhraseLocator,
    };

    use super::*;

    fn test_state() -> AppState {
        let pipeline = Arc::new(CuePipeline::new(
            Arc::new(StubTranscriber),
            Arc::new(StubCueGenerator),
            Arc::new(StubSynthesizer),
            PhraseLocator::default(),
        ));
        AppState::new(pipeline, 5.0)
    }

    #[tokio::test]
    async fn transcribe_returns_words_and_caches() {
        let state = test_state();
        let req = TranscribeRequest {
            audio_url: "https://example.com/a.mp3".into(),
        };

        let Json(transcript) = transcribe(State(state.clone()), Json(req)).await.unwrap();

        assert!(!transcript.words.is_empty());
        assert!(state.cached_transcript().is_some());
    }

    #[tokio::test]
    async fn transcribe_rejects_blank_url() {
        let req = TranscribeRequest {
            audio_url: "   ".into(),
        };
        let err = transcribe(State(test_state()), Json(req)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn cues_without_transcript_is_not_found() {
        let err = plan_cues(State(test_state()), None).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cues_after_transcribe_returns_a_sheet() {
        let state = test_state();
        let transcript = state.pipeline.transcribe("stub://audio").unwrap();
        state.remember_transcript(transcript);

        let Json(sheet) = plan_cues(State(state), None).await.unwrap();

        assert!(!sheet.cues.is_empty());
        assert_eq!(sheet.matched + sheet.unmatched, sheet.cues.len());
    }

    #[tokio::test]
    async fn sound_rejects_empty_text() {
        let req = SoundRequest {
            text: "  ".into(),
            duration_seconds: None,
        };
        let err = synthesize_sound(State(test_state()), Json(req))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn sound_returns_base64_payload() {
        let req = SoundRequest {
            text: "gentle rain".into(),
            duration_seconds: Some(3.0),
        };
        let Json(response) = synthesize_sound(State(test_state()), Json(req))
            .await
            .unwrap();
        assert!(response.audio_base64.starts_with("data:audio/mpeg;base64,"));
    }

    #[tokio::test]
    async fn health_reports_diagnostics() {
        let state = test_state();
        state.pipeline.transcribe("stub://audio").unwrap();

        let Json(response) = health(State(state)).await;

        assert_eq!(response.status, "ok");
        assert_eq!(response.diagnostics.transcribe_calls, 1);
    }
}
