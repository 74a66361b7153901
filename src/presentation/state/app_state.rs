use std::sync::Arc;

use crate::application::ports::{
    AudioNormalizer, InferenceClient, SpeechSynthesizer, TranscriptionEngine,
};
use crate::application::services::ConsultationService;
use crate::presentation::config::Settings;

pub struct AppState<N, T, I, S>
where
    N: AudioNormalizer,
    T: TranscriptionEngine,
    I: InferenceClient,
    S: SpeechSynthesizer + ?Sized,
{
    pub consultation_service: Arc<ConsultationService<N, T, I, S>>,
    pub settings: Settings,
}

impl<N, T, I, S> Clone for AppState<N, T, I, S>
where
    N: AudioNormalizer,
    T: TranscriptionEngine,
    I: InferenceClient,
    S: SpeechSynthesizer + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            consultation_service: Arc::clone(&self.consultation_service),
            settings: self.settings.clone(),
        }
    }
}
