use async_trait::async_trait;

use crate::domain::DoctorMessage;

/// One synchronous chat-completion call. The message shape (text, image, or
/// both) is decided upstream; this port only carries it to the model.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn infer(
        &self,
        model: &str,
        system_prompt: &str,
        message: &DoctorMessage,
    ) -> Result<String, InferenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
