use serde::Deserialize;

/// Carried as a constant so the demo behaves the same with an empty
/// environment; overridable via `DOCTOR_SYSTEM_PROMPT`.
const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional doctor (for learning purposes only). \
     Respond concisely (max 3 sentences), compassionately, in plain language. \
     No technical jargon, lists, or numbered steps. Speak directly to the patient.";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub groq: GroqSettings,
    pub transcription: TranscriptionSettings,
    pub inference: InferenceSettings,
    pub synthesis: SynthesisSettings,
    pub artifacts: ArtifactSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqSettings {
    pub api_key: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub primary_model: String,
    pub secondary_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceSettings {
    pub text_model: String,
    pub vision_model: String,
    pub system_prompt: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisProviderSetting {
    Gtts,
    #[serde(rename = "elevenlabs")]
    ElevenLabs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisSettings {
    pub provider: SynthesisProviderSetting,
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_voice_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactSettings {
    pub base_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Builds settings from the process environment, with defaults suited
    /// to a local demo. Only `GROQ_API_KEY` is genuinely required; its
    /// absence is handled at request time, not at startup.
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
            },
            groq: GroqSettings {
                api_key: std::env::var("GROQ_API_KEY").unwrap_or_default(),
                base_url: std::env::var("GROQ_BASE_URL").ok(),
            },
            transcription: TranscriptionSettings {
                primary_model: env_or("STT_PRIMARY_MODEL", "whisper-large-v3"),
                secondary_model: env_or("STT_SECONDARY_MODEL", "whisper-large-v3-turbo"),
            },
            inference: InferenceSettings {
                text_model: env_or("TEXT_MODEL", "llama-3.3-70b-versatile"),
                vision_model: env_or("VISION_MODEL", "meta-llama/llama-4-scout-17b-16e-instruct"),
                system_prompt: env_or("DOCTOR_SYSTEM_PROMPT", DEFAULT_SYSTEM_PROMPT),
            },
            synthesis: SynthesisSettings {
                provider: match env_or("TTS_PROVIDER", "gtts").to_lowercase().as_str() {
                    "elevenlabs" => SynthesisProviderSetting::ElevenLabs,
                    _ => SynthesisProviderSetting::Gtts,
                },
                elevenlabs_api_key: std::env::var("ELEVENLABS_API_KEY").ok(),
                elevenlabs_voice_id: std::env::var("ELEVENLABS_VOICE_ID").ok(),
            },
            artifacts: ArtifactSettings {
                base_dir: env_or("ARTIFACT_DIR", "."),
            },
            logging: LoggingSettings {
                level: env_or("LOG_LEVEL", "info"),
                enable_json: std::env::var("LOG_FORMAT")
                    .map(|v| v.to_lowercase() == "json")
                    .unwrap_or(false),
            },
        }
    }

    pub fn credential_configured(&self) -> bool {
        !self.groq.api_key.trim().is_empty()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
