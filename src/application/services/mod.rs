mod consultation_service;

pub use consultation_service::{
    ConsultationModels, ConsultationOutcome, ConsultationService, MISSING_CREDENTIAL_MESSAGE,
    NO_INPUT_MESSAGE,
};
