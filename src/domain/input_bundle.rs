/// A single uploaded file as received from the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// The inputs of one consultation request. Exactly one bundle is processed
/// per request; both fields absent is a valid (terminal) case.
#[derive(Debug, Clone, Default)]
pub struct InputBundle {
    pub audio: Option<MediaUpload>,
    pub image: Option<MediaUpload>,
}

impl InputBundle {
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}
