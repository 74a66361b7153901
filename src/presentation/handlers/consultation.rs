use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{
    AudioNormalizer, InferenceClient, SpeechSynthesizer, TranscriptionEngine,
};
use crate::domain::{InputBundle, MediaUpload};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ConsultationResponse {
    pub transcript: String,
    pub response_text: String,
    pub response_audio_path: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `POST /api/v1/consultations` — multipart form with optional `audio` and
/// `image` file fields. Always answers 200 with a consultation outcome once
/// the form parses; pipeline failures arrive as message text, not as HTTP
/// errors.
#[tracing::instrument(skip(state, multipart))]
pub async fn consultation_handler<N, T, I, S>(
    State(state): State<AppState<N, T, I, S>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    N: AudioNormalizer + 'static,
    T: TranscriptionEngine + 'static,
    I: InferenceClient + 'static,
    S: SpeechSynthesizer + 'static + ?Sized,
{
    let mut bundle = InputBundle::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart form");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart form: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().unwrap_or("unnamed").to_string();

        let data = match field.bytes().await {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(field = %name, error = %e, "Failed to read upload");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read field {}: {}", name, e),
                    }),
                )
                    .into_response();
            }
        };

        // Browsers submit empty parts for untouched file inputs; those
        // count as absent.
        if data.is_empty() {
            continue;
        }

        tracing::debug!(field = %name, filename = %filename, bytes = data.len(), "Upload received");

        match name.as_str() {
            "audio" => bundle.audio = Some(MediaUpload::new(filename, data.to_vec())),
            "image" => bundle.image = Some(MediaUpload::new(filename, data.to_vec())),
            other => {
                tracing::warn!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    let outcome = state.consultation_service.handle(bundle).await;

    (
        StatusCode::OK,
        Json(ConsultationResponse {
            transcript: outcome.transcript,
            response_text: outcome.response_text,
            response_audio_path: outcome.response_audio_path,
        }),
    )
        .into_response()
}
