use async_trait::async_trait;

/// Result of one transcription attempt. `unclear` is the engine's structured
/// low-confidence signal; the dispatcher escalates on it instead of matching
/// sentinel phrases itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionOutcome {
    pub text: String,
    pub unclear: bool,
}

impl TranscriptionOutcome {
    pub fn clear(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            unclear: false,
        }
    }

    pub fn unclear(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            unclear: true,
        }
    }
}

/// One speech-to-text attempt against a named model. No retries live here;
/// the escalation policy belongs to the consultation service.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        audio_wav: &[u8],
        model: &str,
    ) -> Result<TranscriptionOutcome, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
