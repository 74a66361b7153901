use std::fmt;

use super::request_stamp::RequestStamp;

/// The per-request files written for audit and debugging. Patient-side
/// artifacts land under `uploads/`, doctor-side under `responses/`.
/// Filenames follow `{role}_{kind}_{timestamp}.{ext}` and must stay stable
/// for any downstream tooling that reads the artifact directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    PatientAudio,
    PatientTranscript,
    PatientImage,
    DoctorText,
    DoctorVoice,
}

impl ArtifactKind {
    pub fn directory(&self) -> &'static str {
        match self {
            ArtifactKind::PatientAudio
            | ArtifactKind::PatientTranscript
            | ArtifactKind::PatientImage => "uploads",
            ArtifactKind::DoctorText | ArtifactKind::DoctorVoice => "responses",
        }
    }

    pub fn file_name(&self, stamp: RequestStamp) -> String {
        match self {
            ArtifactKind::PatientAudio => format!("user_audio_{}.wav", stamp),
            ArtifactKind::PatientTranscript => format!("user_transcript_{}.txt", stamp),
            ArtifactKind::PatientImage => format!("user_image_{}.jpg", stamp),
            ArtifactKind::DoctorText => format!("doctor_text_response_{}.txt", stamp),
            ArtifactKind::DoctorVoice => format!("doctor_voice_{}.mp3", stamp),
        }
    }
}

/// Store-relative path of one artifact, e.g. `uploads/user_audio_1712.wav`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPath(String);

impl ArtifactPath {
    pub fn new(kind: ArtifactKind, stamp: RequestStamp) -> Self {
        Self(format!("{}/{}", kind.directory(), kind.file_name(stamp)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
