mod artifact;
mod consultation_mode;
mod doctor_message;
mod input_bundle;
mod request_stamp;
mod transcript;

pub use artifact::{ArtifactKind, ArtifactPath};
pub use consultation_mode::{ConsultationMode, ModelTier};
pub use doctor_message::{ContentPart, DoctorMessage, MessageContent};
pub use input_bundle::{InputBundle, MediaUpload};
pub use request_stamp::RequestStamp;
pub use transcript::Transcript;
