mod consultation;
mod health;

pub use consultation::{ConsultationResponse, consultation_handler};
pub use health::health_handler;
