use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

/// Alternative voice backend: ElevenLabs text-to-speech. Same trait, same
/// mp3-bytes contract, selected via configuration instead of code changes.
pub struct ElevenLabsSynthesizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    voice_id: String,
    model_id: String,
}

#[derive(Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

impl ElevenLabsSynthesizer {
    pub fn new(api_key: String, voice_id: String, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.elevenlabs.io/v1".to_string()),
            voice_id,
            model_id: "eleven_turbo_v2".to_string(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        let url = format!("{}/text-to-speech/{}", self.base_url, self.voice_id);

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&TtsRequest {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SynthesisError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("body: {}", e)))?;

        tracing::info!(
            voice = %self.voice_id,
            bytes = bytes.len(),
            "ElevenLabs synthesis completed"
        );

        Ok(bytes.to_vec())
    }
}
