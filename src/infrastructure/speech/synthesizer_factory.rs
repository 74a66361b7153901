use std::sync::Arc;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

use super::elevenlabs_synthesizer::ElevenLabsSynthesizer;
use super::gtts_synthesizer::GttsSynthesizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisProvider {
    Gtts,
    ElevenLabs,
}

pub struct SynthesizerFactory;

impl SynthesizerFactory {
    pub fn create(
        provider: SynthesisProvider,
        api_key: Option<String>,
        voice_id: Option<String>,
    ) -> Result<Arc<dyn SpeechSynthesizer>, SynthesisError> {
        match provider {
            SynthesisProvider::Gtts => Ok(Arc::new(GttsSynthesizer::new(None))),
            SynthesisProvider::ElevenLabs => {
                let key = api_key.ok_or_else(|| {
                    SynthesisError::BackendUnavailable(
                        "API key required for ElevenLabs".to_string(),
                    )
                })?;
                let voice = voice_id.ok_or_else(|| {
                    SynthesisError::BackendUnavailable(
                        "voice id required for ElevenLabs".to_string(),
                    )
                })?;
                Ok(Arc::new(ElevenLabsSynthesizer::new(key, voice, None)))
            }
        }
    }
}
