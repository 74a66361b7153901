use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError, TranscriptionOutcome};

/// Phrase some whisper deployments emit instead of failing outright. Mapped
/// onto the structured `unclear` flag so callers never string-match.
const UNCLEAR_SENTINEL: &str = "could not transcribe";

/// Speech-to-text over Groq's whisper endpoint. One request per call, no
/// retries; escalation between models is the consultation service's job,
/// which is why the model identifier arrives per call.
pub struct GroqWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    language: String,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl GroqWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.groq.com/openai/v1".to_string()),
            language: "en".to_string(),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for GroqWhisperEngine {
    async fn transcribe(
        &self,
        audio_wav: &[u8],
        model: &str,
    ) -> Result<TranscriptionOutcome, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let file_part = multipart::Part::bytes(audio_wav.to_vec())
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", model.to_string())
            .text("language", self.language.clone())
            .part("file", file_part);

        tracing::debug!(model = %model, bytes = audio_wav.len(), "Sending audio to Groq whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("body: {}", e)))?;

        let text = parsed.text.trim().to_string();
        let unclear = text.is_empty() || text.to_lowercase().contains(UNCLEAR_SENTINEL);

        tracing::info!(
            model = %model,
            chars = text.len(),
            unclear = unclear,
            "Groq whisper transcription completed"
        );

        if unclear {
            Ok(TranscriptionOutcome::unclear(text))
        } else {
            Ok(TranscriptionOutcome::clear(text))
        }
    }
}
