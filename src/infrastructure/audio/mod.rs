mod groq_whisper_engine;
mod wav_normalizer;

pub use groq_whisper_engine::GroqWhisperEngine;
pub use wav_normalizer::WavNormalizer;
