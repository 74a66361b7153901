use super::consultation_mode::ConsultationMode;
use super::transcript::Transcript;

/// The outbound request to the inference client: a user-role payload whose
/// shape is fully determined by which inputs were present.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorMessage {
    pub content: MessageContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    /// Plain transcript text, used by the text-only mode.
    Text(String),
    /// Structured parts, used whenever an image is attached.
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { url: String },
}

impl DoctorMessage {
    pub fn text_only(transcript: &Transcript) -> Self {
        Self {
            content: MessageContent::Text(transcript.as_str().to_string()),
        }
    }

    pub fn image_only(image_data_url: String) -> Self {
        Self {
            content: MessageContent::Parts(vec![ContentPart::ImageUrl {
                url: image_data_url,
            }]),
        }
    }

    pub fn text_and_image(transcript: &Transcript, image_data_url: String) -> Self {
        Self {
            content: MessageContent::Parts(vec![
                ContentPart::Text {
                    text: transcript.as_str().to_string(),
                },
                ContentPart::ImageUrl {
                    url: image_data_url,
                },
            ]),
        }
    }

    /// Builds the message for a mode, given whichever inputs materialized.
    /// Returns `None` when the mode's required inputs are missing, which
    /// includes every [`ConsultationMode::NoInput`] request.
    pub fn for_mode(
        mode: ConsultationMode,
        transcript: Option<&Transcript>,
        image_data_url: Option<String>,
    ) -> Option<Self> {
        match mode {
            ConsultationMode::TextOnly => transcript.map(Self::text_only),
            ConsultationMode::ImageOnly => image_data_url.map(Self::image_only),
            ConsultationMode::TextAndImage => transcript
                .zip(image_data_url)
                .map(|(t, url)| Self::text_and_image(t, url)),
            ConsultationMode::NoInput => None,
        }
    }

    /// The transcript text carried by this message, if any.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text(t) => Some(t.as_str()),
            MessageContent::Parts(parts) => parts.iter().find_map(|p| match p {
                ContentPart::Text { text } => Some(text.as_str()),
                ContentPart::ImageUrl { .. } => None,
            }),
        }
    }

    pub fn has_image(&self) -> bool {
        match &self.content {
            MessageContent::Text(_) => false,
            MessageContent::Parts(parts) => parts
                .iter()
                .any(|p| matches!(p, ContentPart::ImageUrl { .. })),
        }
    }
}
