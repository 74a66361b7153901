/// How a consultation request is routed, determined entirely by which
/// inputs the patient supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsultationMode {
    TextOnly,
    ImageOnly,
    TextAndImage,
    NoInput,
}

/// Which class of model a mode is served by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Text,
    Multimodal,
}

impl ConsultationMode {
    pub fn from_inputs(has_audio: bool, has_image: bool) -> Self {
        match (has_audio, has_image) {
            (true, false) => ConsultationMode::TextOnly,
            (false, true) => ConsultationMode::ImageOnly,
            (true, true) => ConsultationMode::TextAndImage,
            (false, false) => ConsultationMode::NoInput,
        }
    }

    /// `None` for [`ConsultationMode::NoInput`], which never reaches a model.
    pub fn model_tier(&self) -> Option<ModelTier> {
        match self {
            ConsultationMode::TextOnly => Some(ModelTier::Text),
            ConsultationMode::ImageOnly | ConsultationMode::TextAndImage => {
                Some(ModelTier::Multimodal)
            }
            ConsultationMode::NoInput => None,
        }
    }

    pub fn uses_image(&self) -> bool {
        matches!(
            self,
            ConsultationMode::ImageOnly | ConsultationMode::TextAndImage
        )
    }

    pub fn uses_transcript(&self) -> bool {
        matches!(
            self,
            ConsultationMode::TextOnly | ConsultationMode::TextAndImage
        )
    }
}
