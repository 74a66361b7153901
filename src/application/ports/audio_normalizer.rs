/// Converts uploaded audio in whatever container the browser produced into
/// the canonical transcription format (mono, 16-bit, 16 kHz WAV).
pub trait AudioNormalizer: Send + Sync {
    fn normalize(&self, raw: &[u8]) -> Result<Vec<u8>, NormalizationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizationError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("resampling failed: {0}")]
    ResamplingFailed(String),
    #[error("wav encoding failed: {0}")]
    EncodingFailed(String),
}
