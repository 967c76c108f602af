use thiserror::Error;

/// All errors produced by cuemark-core.
///
/// A phrase that cannot be located in the transcript is *not* an error;
/// the locator reports it as a value. Only provider and I/O failures
/// surface here.
#[derive(Debug, Error)]
pub enum CuemarkError {
    #[error("audio fetch failed: {0}")]
    AudioFetch(String),

    #[error("transcription service error: {0}")]
    Transcription(String),

    #[error("cue generation error: {0}")]
    CueGeneration(String),

    #[error("sound synthesis error: {0}")]
    SoundSynthesis(String),

    #[error("missing API key: {0}")]
    MissingApiKey(&'static str),

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("no transcript available; run transcription first")]
    NoTranscript,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CuemarkError>;
