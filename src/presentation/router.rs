use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{
    AudioNormalizer, InferenceClient, SpeechSynthesizer, TranscriptionEngine,
};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{consultation_handler, health_handler};
use crate::presentation::state::AppState;

pub fn create_router<N, T, I, S>(state: AppState<N, T, I, S>) -> Router
where
    N: AudioNormalizer + 'static,
    T: TranscriptionEngine + 'static,
    I: InferenceClient + 'static,
    S: SpeechSynthesizer + 'static + ?Sized,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/v1/consultations",
            post(consultation_handler::<N, T, I, S>),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
