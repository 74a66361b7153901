use async_trait::async_trait;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

/// The unauthenticated Google Translate TTS endpoint rejects long inputs,
/// so text is synthesized in chunks and the mp3 frames concatenated.
const MAX_CHUNK_CHARS: usize = 200;

/// Text-to-speech via the Google Translate endpoint (the gTTS approach).
/// Free and keyless, which keeps the demo runnable with only the one Groq
/// credential configured.
pub struct GttsSynthesizer {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl GttsSynthesizer {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url
                .unwrap_or_else(|| "https://translate.google.com/translate_tts".to_string()),
            language: "en".to_string(),
        }
    }

    async fn fetch_chunk(&self, chunk: &str) -> Result<Vec<u8>, SynthesisError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.language.as_str()),
                ("q", chunk),
            ])
            .send()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            return Err(SynthesisError::ApiRequestFailed(format!(
                "status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("body: {}", e)))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GttsSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        let chunks = chunk_for_synthesis(text, MAX_CHUNK_CHARS);
        let mut audio = Vec::new();

        for chunk in &chunks {
            let frames = self.fetch_chunk(chunk).await?;
            audio.extend_from_slice(&frames);
        }

        tracing::info!(
            chunks = chunks.len(),
            bytes = audio.len(),
            "gTTS synthesis completed"
        );

        Ok(audio)
    }
}

/// Splits text into synthesis-sized pieces, preferring whitespace breaks so
/// words are never cut mid-way. Always returns at least one chunk for
/// non-empty input.
pub fn chunk_for_synthesis(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            chunks.push(std::mem::take(&mut current));
        }
        // A single word longer than the limit is split hard.
        if word.chars().count() > max_chars {
            let mut piece = String::new();
            for ch in word.chars() {
                if piece.chars().count() == max_chars {
                    chunks.push(std::mem::take(&mut piece));
                }
                piece.push(ch);
            }
            current = piece;
            continue;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
