use async_trait::async_trait;

/// Converts response text to encoded audio (mp3 bytes). Backends are
/// interchangeable behind this trait; failure never discards the text
/// response upstream.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("nothing to synthesize")]
    EmptyText,
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
}
