use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;

use crate::application::ports::{
    ArtifactStore, AudioNormalizer, InferenceClient, SpeechSynthesizer, TranscriptionEngine,
};
use crate::domain::{
    ArtifactKind, ArtifactPath, ConsultationMode, DoctorMessage, InputBundle, MediaUpload,
    ModelTier, RequestStamp, Transcript,
};

pub const NO_INPUT_MESSAGE: &str = "No input provided. Please upload audio or image.";
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "Missing GROQ API key. Set GROQ_API_KEY and try again.";

/// Model identifiers and the system prompt used for one deployment.
#[derive(Debug, Clone)]
pub struct ConsultationModels {
    pub primary_stt: String,
    pub secondary_stt: String,
    pub text_model: String,
    pub vision_model: String,
    pub system_prompt: String,
}

/// What the caller gets back, always. Failures surface as message text in
/// `response_text`, never as an error return.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsultationOutcome {
    pub transcript: String,
    pub response_text: String,
    pub response_audio_path: Option<String>,
}

impl ConsultationOutcome {
    fn terminal(transcript: String, response_text: impl Into<String>) -> Self {
        Self {
            transcript,
            response_text: response_text.into(),
            response_audio_path: None,
        }
    }
}

/// The request dispatcher: decides the consultation mode from input
/// presence, runs transcription with a single bounded escalation, calls
/// inference, synthesizes the reply, and persists audit artifacts along
/// the way. All resilience policy lives here; the ports stay thin.
pub struct ConsultationService<N, T, I, S>
where
    N: AudioNormalizer,
    T: TranscriptionEngine,
    I: InferenceClient,
    S: SpeechSynthesizer + ?Sized,
{
    normalizer: Arc<N>,
    transcriber: Arc<T>,
    inference: Arc<I>,
    synthesizer: Arc<S>,
    artifacts: Arc<dyn ArtifactStore>,
    models: ConsultationModels,
    credential_configured: bool,
}

impl<N, T, I, S> ConsultationService<N, T, I, S>
where
    N: AudioNormalizer,
    T: TranscriptionEngine,
    I: InferenceClient,
    S: SpeechSynthesizer + ?Sized,
{
    pub fn new(
        normalizer: Arc<N>,
        transcriber: Arc<T>,
        inference: Arc<I>,
        synthesizer: Arc<S>,
        artifacts: Arc<dyn ArtifactStore>,
        models: ConsultationModels,
        credential_configured: bool,
    ) -> Self {
        Self {
            normalizer,
            transcriber,
            inference,
            synthesizer,
            artifacts,
            models,
            credential_configured,
        }
    }

    pub async fn handle(&self, bundle: InputBundle) -> ConsultationOutcome {
        self.handle_at(bundle, RequestStamp::now()).await
    }

    #[tracing::instrument(
        skip(self, bundle),
        fields(has_audio = bundle.has_audio(), has_image = bundle.has_image(), stamp = %stamp)
    )]
    pub async fn handle_at(&self, bundle: InputBundle, stamp: RequestStamp) -> ConsultationOutcome {
        if !self.credential_configured {
            tracing::warn!("Consultation rejected: no API credential configured");
            return ConsultationOutcome::terminal(String::new(), MISSING_CREDENTIAL_MESSAGE);
        }

        let mode = ConsultationMode::from_inputs(bundle.has_audio(), bundle.has_image());
        if mode == ConsultationMode::NoInput {
            tracing::warn!("Consultation request carried neither audio nor image");
            return ConsultationOutcome::terminal(String::new(), NO_INPUT_MESSAGE);
        }

        let mut transcript: Option<Transcript> = None;
        if let Some(audio) = &bundle.audio {
            let raw = self.transcribe_audio(audio, stamp).await;
            let resolved = Transcript::or_fallback(&raw);
            if resolved.is_fallback() {
                tracing::info!("Transcript empty after escalation, using fallback text");
            }
            self.persist(
                ArtifactKind::PatientTranscript,
                stamp,
                Bytes::from(resolved.as_str().to_owned()),
            )
            .await;
            transcript = Some(resolved);
        }

        let mut image_data_url: Option<String> = None;
        if let Some(image) = &bundle.image {
            match encode_image_data_url(&image.bytes) {
                Ok(url) => {
                    self.persist(
                        ArtifactKind::PatientImage,
                        stamp,
                        Bytes::from(image.bytes.clone()),
                    )
                    .await;
                    image_data_url = Some(url);
                }
                Err(reason) => {
                    tracing::error!(filename = %image.filename, reason = %reason, "Image processing failed");
                    return ConsultationOutcome::terminal(
                        transcript.map(Transcript::into_string).unwrap_or_default(),
                        format!("Image processing failed: {}", reason),
                    );
                }
            }
        }

        let transcript_text = transcript
            .as_ref()
            .map(|t| t.as_str().to_owned())
            .unwrap_or_default();

        let Some(message) = DoctorMessage::for_mode(mode, transcript.as_ref(), image_data_url)
        else {
            return ConsultationOutcome::terminal(transcript_text, NO_INPUT_MESSAGE);
        };

        let model = match mode.model_tier() {
            Some(ModelTier::Text) => self.models.text_model.as_str(),
            Some(ModelTier::Multimodal) => self.models.vision_model.as_str(),
            None => return ConsultationOutcome::terminal(transcript_text, NO_INPUT_MESSAGE),
        };

        tracing::debug!(mode = ?mode, model = %model, "Dispatching inference call");

        let mut response_text = match self
            .inference
            .infer(model, &self.models.system_prompt, &message)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, model = %model, "Inference call failed");
                format!("Analysis failed: {}", e)
            }
        };

        self.persist(
            ArtifactKind::DoctorText,
            stamp,
            Bytes::from(response_text.clone()),
        )
        .await;

        let response_audio_path = match self.synthesizer.synthesize(&response_text).await {
            Ok(mp3) => {
                let path = ArtifactPath::new(ArtifactKind::DoctorVoice, stamp);
                match self.artifacts.put(&path, Bytes::from(mp3)).await {
                    Ok(()) => Some(path.to_string()),
                    Err(e) => {
                        tracing::warn!(error = %e, path = %path, "Voice artifact write failed");
                        response_text.push_str(&format!(" (Voice generation failed: {})", e));
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Speech synthesis failed, returning text only");
                response_text.push_str(&format!(" (Voice generation failed: {})", e));
                None
            }
        };

        ConsultationOutcome {
            transcript: transcript_text,
            response_text,
            response_audio_path,
        }
    }

    /// Normalizes and transcribes one audio upload. Every failure is local:
    /// the worst case is an empty string, which the caller resolves to the
    /// fallback transcript.
    async fn transcribe_audio(&self, audio: &MediaUpload, stamp: RequestStamp) -> String {
        let wav = match self.normalizer.normalize(&audio.bytes) {
            Ok(wav) => wav,
            Err(e) => {
                tracing::warn!(error = %e, filename = %audio.filename, "Audio normalization failed, continuing without transcript");
                return String::new();
            }
        };

        self.persist(ArtifactKind::PatientAudio, stamp, Bytes::from(wav.clone()))
            .await;

        self.transcribe_with_escalation(&wav).await
    }

    /// Primary model first; on an unclear or failed result, exactly one
    /// retry with the secondary model, then stop.
    async fn transcribe_with_escalation(&self, wav: &[u8]) -> String {
        match self
            .transcriber
            .transcribe(wav, &self.models.primary_stt)
            .await
        {
            Ok(outcome) if !outcome.unclear && !outcome.text.trim().is_empty() => {
                return outcome.text;
            }
            Ok(outcome) => {
                tracing::debug!(
                    model = %self.models.primary_stt,
                    unclear = outcome.unclear,
                    "Primary transcription unclear, escalating"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    model = %self.models.primary_stt,
                    "Primary transcription failed, escalating"
                );
            }
        }

        match self
            .transcriber
            .transcribe(wav, &self.models.secondary_stt)
            .await
        {
            Ok(outcome) => outcome.text,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    model = %self.models.secondary_stt,
                    "Secondary transcription failed"
                );
                String::new()
            }
        }
    }

    async fn persist(&self, kind: ArtifactKind, stamp: RequestStamp, data: Bytes) {
        let path = ArtifactPath::new(kind, stamp);
        if let Err(e) = self.artifacts.put(&path, data).await {
            tracing::warn!(error = %e, path = %path, "Artifact write failed, continuing");
        }
    }
}

fn encode_image_data_url(bytes: &[u8]) -> Result<String, String> {
    if bytes.is_empty() {
        return Err("empty image upload".to_string());
    }
    Ok(format!(
        "data:image/jpeg;base64,{}",
        BASE64.encode(bytes)
    ))
}
