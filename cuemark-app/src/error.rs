//! HTTP error mapping for the API surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cuemark_core::CuemarkError;
use serde_json::json;

/// Error returned by API handlers. Carries the status the client sees and a
/// message safe to put on the wire.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<CuemarkError> for ApiError {
    fn from(err: CuemarkError) -> Self {
        let status = match &err {
            CuemarkError::AudioFetch(_)
            | CuemarkError::Transcription(_)
            | CuemarkError::CueGeneration(_)
            | CuemarkError::SoundSynthesis(_)
            | CuemarkError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            CuemarkError::MissingApiKey(_) => StatusCode::SERVICE_UNAVAILABLE,
            CuemarkError::NoTranscript => StatusCode::NOT_FOUND,
            CuemarkError::Io(_) | CuemarkError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{}", self.message);
        } else {
            tracing::warn!(status = %self.status, "{}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
