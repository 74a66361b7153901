mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ArtifactSettings, GroqSettings, InferenceSettings, LoggingSettings, ServerSettings, Settings,
    SynthesisProviderSetting, SynthesisSettings, TranscriptionSettings,
};
