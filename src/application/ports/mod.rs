mod artifact_store;
mod audio_normalizer;
mod inference_client;
mod speech_synthesizer;
mod transcription_engine;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use audio_normalizer::{AudioNormalizer, NormalizationError};
pub use inference_client::{InferenceClient, InferenceError};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError, TranscriptionOutcome};
