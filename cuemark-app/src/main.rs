//! Cuemark service entry point.

mod error;
mod routes;
mod settings;
mod state;

use std::sync::Arc;

use cuemark_core::{
    providers::stub::{StubCueGenerator, StubSynthesizer, StubTranscriber},
    CueGenerator, CuePipeline, ElevenLabsSynthesizer, LocatorConfig, OpenAiCueGenerator,
    PhraseLocator, SoundSynthesizer, Transcriber, WhisperApiTranscriber,
};
use settings::{default_settings_path, load_settings, AppSettings};
use state::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn build_pipeline(settings: &AppSettings) -> anyhow::Result<CuePipeline> {
    let (transcriber, cue_generator): (Arc<dyn Transcriber>, Arc<dyn CueGenerator>) =
        match settings.openai_api_key.clone() {
            Some(key) => (
                Arc::new(WhisperApiTranscriber::new(key.clone())?),
                Arc::new(OpenAiCueGenerator::new(key)?),
            ),
            None => {
                warn!("OPENAI_API_KEY not set; using stub transcription and cue generation");
                (Arc::new(StubTranscriber), Arc::new(StubCueGenerator))
            }
        };

    let synthesizer: Arc<dyn SoundSynthesizer> = match settings.elevenlabs_api_key.clone() {
        Some(key) => Arc::new(ElevenLabsSynthesizer::new(key)?),
        None => {
            warn!("ELEVEN_LABS_API_KEY not set; using stub sound synthesis");
            Arc::new(StubSynthesizer)
        }
    };

    let locator = PhraseLocator::new(LocatorConfig {
        acceptance_threshold: settings.acceptance_threshold,
        min_context_window: settings.min_context_window,
        ..LocatorConfig::default()
    });

    Ok(CuePipeline::new(transcriber, cue_generator, synthesizer, locator))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cuemark=info")),
        )
        .init();

    let settings_path = default_settings_path();
    let settings = load_settings(&settings_path);
    info!(path = %settings_path.display(), "settings loaded");

    let pipeline = Arc::new(build_pipeline(&settings)?);
    let state = AppState::new(pipeline, settings.default_sound_duration);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    info!(addr = %settings.bind_addr, "cuemark listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
