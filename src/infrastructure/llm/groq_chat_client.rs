use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::application::ports::{InferenceClient, InferenceError};
use crate::domain::{ContentPart, DoctorMessage, MessageContent};

/// Chat completions against Groq's OpenAI-compatible endpoint. Text-only
/// messages go out as a plain content string; image-bearing messages as the
/// structured parts array with base64 data-URL `image_url` entries.
pub struct GroqChatClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: WireContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WireContent<'a> {
    Text(&'a str),
    Parts(Vec<WirePart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WirePart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: WireImageUrl<'a> },
}

#[derive(Serialize)]
struct WireImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GroqChatClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.groq.com/openai/v1".to_string()),
        }
    }

    fn to_wire<'a>(message: &'a DoctorMessage) -> WireMessage<'a> {
        let content = match &message.content {
            MessageContent::Text(text) => WireContent::Text(text),
            MessageContent::Parts(parts) => WireContent::Parts(
                parts
                    .iter()
                    .map(|part| match part {
                        ContentPart::Text { text } => WirePart::Text { text },
                        ContentPart::ImageUrl { url } => WirePart::ImageUrl {
                            image_url: WireImageUrl { url },
                        },
                    })
                    .collect(),
            ),
        };
        WireMessage {
            role: "user",
            content,
        }
    }
}

#[async_trait]
impl InferenceClient for GroqChatClient {
    async fn infer(
        &self,
        model: &str,
        system_prompt: &str,
        message: &DoctorMessage,
    ) -> Result<String, InferenceError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: WireContent::Text(system_prompt),
                },
                Self::to_wire(message),
            ],
        };

        tracing::debug!(model = %model, has_image = message.has_image(), "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| InferenceError::ApiRequestFailed(format!("request: {}", e)))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(InferenceError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(InferenceError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(format!("body: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| InferenceError::InvalidResponse("no completion content".to_string()))?;

        tracing::info!(model = %model, chars = content.len(), "Chat completion received");

        Ok(content)
    }
}
