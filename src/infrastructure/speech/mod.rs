mod elevenlabs_synthesizer;
mod gtts_synthesizer;
mod synthesizer_factory;

pub use elevenlabs_synthesizer::ElevenLabsSynthesizer;
pub use gtts_synthesizer::{GttsSynthesizer, chunk_for_synthesis};
pub use synthesizer_factory::{SynthesisProvider, SynthesizerFactory};
