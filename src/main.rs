use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;

use curewise::application::services::{ConsultationModels, ConsultationService};
use curewise::infrastructure::audio::{GroqWhisperEngine, WavNormalizer};
use curewise::infrastructure::llm::GroqChatClient;
use curewise::infrastructure::observability::{TracingConfig, init_tracing};
use curewise::infrastructure::speech::{SynthesisProvider, SynthesizerFactory};
use curewise::infrastructure::storage::LocalArtifactStore;
use curewise::presentation::{AppState, Settings, SynthesisProviderSetting, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::default(), settings.server.port);

    if !settings.credential_configured() {
        tracing::warn!("GROQ_API_KEY is not set; consultations will be rejected until it is");
    }

    let normalizer = Arc::new(WavNormalizer);
    let transcriber = Arc::new(GroqWhisperEngine::new(
        settings.groq.api_key.clone(),
        settings.groq.base_url.clone(),
    ));
    let inference = Arc::new(GroqChatClient::new(
        settings.groq.api_key.clone(),
        settings.groq.base_url.clone(),
    ));

    let provider = match settings.synthesis.provider {
        SynthesisProviderSetting::Gtts => SynthesisProvider::Gtts,
        SynthesisProviderSetting::ElevenLabs => SynthesisProvider::ElevenLabs,
    };
    let synthesizer = SynthesizerFactory::create(
        provider,
        settings.synthesis.elevenlabs_api_key.clone(),
        settings.synthesis.elevenlabs_voice_id.clone(),
    )?;

    let artifacts = Arc::new(LocalArtifactStore::new(PathBuf::from(
        &settings.artifacts.base_dir,
    ))?);

    let models = ConsultationModels {
        primary_stt: settings.transcription.primary_model.clone(),
        secondary_stt: settings.transcription.secondary_model.clone(),
        text_model: settings.inference.text_model.clone(),
        vision_model: settings.inference.vision_model.clone(),
        system_prompt: settings.inference.system_prompt.clone(),
    };

    let consultation_service = Arc::new(ConsultationService::new(
        normalizer,
        transcriber,
        inference,
        synthesizer,
        artifacts,
        models,
        settings.credential_configured(),
    ));

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);

    let state = AppState {
        consultation_service,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
