use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use bytes::Bytes;

use curewise::application::ports::{
    ArtifactStore, ArtifactStoreError, AudioNormalizer, InferenceClient, InferenceError,
    NormalizationError, SpeechSynthesizer, SynthesisError, TranscriptionEngine,
    TranscriptionError, TranscriptionOutcome,
};
use curewise::application::services::{
    ConsultationModels, ConsultationService, MISSING_CREDENTIAL_MESSAGE, NO_INPUT_MESSAGE,
};
use curewise::domain::{
    ArtifactKind, ArtifactPath, DoctorMessage, InputBundle, MediaUpload, RequestStamp, Transcript,
};

const PRIMARY_STT: &str = "stt-primary";
const SECONDARY_STT: &str = "stt-secondary";
const TEXT_MODEL: &str = "general-text-model";
const VISION_MODEL: &str = "multimodal-model";

struct PassthroughNormalizer;

impl AudioNormalizer for PassthroughNormalizer {
    fn normalize(&self, raw: &[u8]) -> Result<Vec<u8>, NormalizationError> {
        Ok(raw.to_vec())
    }
}

struct BrokenNormalizer;

impl AudioNormalizer for BrokenNormalizer {
    fn normalize(&self, _raw: &[u8]) -> Result<Vec<u8>, NormalizationError> {
        Err(NormalizationError::DecodingFailed(
            "unsupported container".to_string(),
        ))
    }
}

struct ScriptedTranscriber {
    script: Mutex<VecDeque<Result<TranscriptionOutcome, TranscriptionError>>>,
    models_called: Mutex<Vec<String>>,
}

impl ScriptedTranscriber {
    fn new(script: Vec<Result<TranscriptionOutcome, TranscriptionError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            models_called: Mutex::new(Vec::new()),
        }
    }

    fn models_called(&self) -> Vec<String> {
        self.models_called.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for ScriptedTranscriber {
    async fn transcribe(
        &self,
        _audio_wav: &[u8],
        model: &str,
    ) -> Result<TranscriptionOutcome, TranscriptionError> {
        self.models_called.lock().unwrap().push(model.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(TranscriptionOutcome::clear("unscripted")))
    }
}

struct RecordingInference {
    reply: Option<String>,
    calls: Mutex<Vec<(String, DoctorMessage)>>,
}

impl RecordingInference {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, DoctorMessage)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl InferenceClient for RecordingInference {
    async fn infer(
        &self,
        model: &str,
        _system_prompt: &str,
        message: &DoctorMessage,
    ) -> Result<String, InferenceError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), message.clone()));
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(InferenceError::ApiRequestFailed(
                "connection reset".to_string(),
            )),
        }
    }
}

struct OkSynthesizer;

#[async_trait::async_trait]
impl SpeechSynthesizer for OkSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, SynthesisError> {
        Ok(vec![0xFF, 0xFB, 0x00])
    }
}

struct FailingSynthesizer;

#[async_trait::async_trait]
impl SpeechSynthesizer for FailingSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, SynthesisError> {
        Err(SynthesisError::ApiRequestFailed("tts down".to_string()))
    }
}

#[derive(Default)]
struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait::async_trait]
impl ArtifactStore for MemoryStore {
    async fn put(&self, path: &ArtifactPath, data: Bytes) -> Result<(), ArtifactStoreError> {
        self.objects
            .lock()
            .unwrap()
            .insert(path.as_str().to_string(), data.to_vec());
        Ok(())
    }

    async fn fetch(&self, path: &ArtifactPath) -> Result<Vec<u8>, ArtifactStoreError> {
        self.objects
            .lock()
            .unwrap()
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| ArtifactStoreError::NotFound(path.as_str().to_string()))
    }
}

fn models() -> ConsultationModels {
    ConsultationModels {
        primary_stt: PRIMARY_STT.to_string(),
        secondary_stt: SECONDARY_STT.to_string(),
        text_model: TEXT_MODEL.to_string(),
        vision_model: VISION_MODEL.to_string(),
        system_prompt: "You are a professional doctor.".to_string(),
    }
}

fn audio_upload() -> MediaUpload {
    MediaUpload::new("symptoms.webm", vec![1, 2, 3, 4])
}

fn image_upload() -> MediaUpload {
    MediaUpload::new("skin-photo.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])
}

#[tokio::test]
async fn given_no_inputs_then_terminal_message_and_no_model_call_and_no_artifacts() {
    let inference = Arc::new(RecordingInference::replying("unused"));
    let store = Arc::new(MemoryStore::default());
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::new(ScriptedTranscriber::new(vec![])),
        Arc::clone(&inference),
        Arc::new(OkSynthesizer),
        store.clone(),
        models(),
        true,
    );

    let outcome = service.handle(InputBundle::default()).await;

    assert_eq!(outcome.transcript, "");
    assert_eq!(outcome.response_text, NO_INPUT_MESSAGE);
    assert_eq!(outcome.response_audio_path, None);
    assert!(inference.calls().is_empty());
    assert!(store.keys().is_empty());
}

#[tokio::test]
async fn given_missing_credential_then_request_short_circuits_before_any_call() {
    let transcriber = Arc::new(ScriptedTranscriber::new(vec![]));
    let inference = Arc::new(RecordingInference::replying("unused"));
    let store = Arc::new(MemoryStore::default());
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::clone(&transcriber),
        Arc::clone(&inference),
        Arc::new(OkSynthesizer),
        store.clone(),
        models(),
        false,
    );

    let bundle = InputBundle {
        audio: Some(audio_upload()),
        image: Some(image_upload()),
    };
    let outcome = service.handle(bundle).await;

    assert_eq!(outcome.response_text, MISSING_CREDENTIAL_MESSAGE);
    assert_eq!(outcome.response_audio_path, None);
    assert!(transcriber.models_called().is_empty());
    assert!(inference.calls().is_empty());
    assert!(store.keys().is_empty());
}

#[tokio::test]
async fn given_audio_only_then_text_message_goes_to_general_model() {
    let transcriber = Arc::new(ScriptedTranscriber::new(vec![Ok(
        TranscriptionOutcome::clear("I have a headache"),
    )]));
    let inference = Arc::new(RecordingInference::replying("Rest and hydrate."));
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::clone(&transcriber),
        Arc::clone(&inference),
        Arc::new(OkSynthesizer),
        Arc::new(MemoryStore::default()),
        models(),
        true,
    );

    let bundle = InputBundle {
        audio: Some(audio_upload()),
        image: None,
    };
    let outcome = service.handle(bundle).await;

    let calls = inference.calls();
    assert_eq!(calls.len(), 1);
    let (model, message) = &calls[0];
    assert_eq!(model, TEXT_MODEL);
    assert_eq!(message.text(), Some("I have a headache"));
    assert!(!message.has_image());
    assert_eq!(outcome.transcript, "I have a headache");
    assert_eq!(outcome.response_text, "Rest and hydrate.");
}

#[tokio::test]
async fn given_image_only_then_image_message_goes_to_multimodal_model_with_empty_transcript() {
    let transcriber = Arc::new(ScriptedTranscriber::new(vec![]));
    let inference = Arc::new(RecordingInference::replying("Looks like mild acne."));
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::clone(&transcriber),
        Arc::clone(&inference),
        Arc::new(OkSynthesizer),
        Arc::new(MemoryStore::default()),
        models(),
        true,
    );

    let bundle = InputBundle {
        audio: None,
        image: Some(image_upload()),
    };
    let outcome = service.handle(bundle).await;

    let calls = inference.calls();
    assert_eq!(calls.len(), 1);
    let (model, message) = &calls[0];
    assert_eq!(model, VISION_MODEL);
    assert!(message.has_image());
    assert_eq!(message.text(), None);
    assert!(transcriber.models_called().is_empty());
    assert_eq!(outcome.transcript, "");
}

#[tokio::test]
async fn given_unreadable_image_then_failure_message_is_terminal_without_model_call() {
    let inference = Arc::new(RecordingInference::replying("unused"));
    let store = Arc::new(MemoryStore::default());
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::new(ScriptedTranscriber::new(vec![])),
        Arc::clone(&inference),
        Arc::new(OkSynthesizer),
        store.clone(),
        models(),
        true,
    );

    let bundle = InputBundle {
        audio: None,
        image: Some(MediaUpload::new("empty.jpg", Vec::new())),
    };
    let outcome = service.handle(bundle).await;

    assert!(outcome.response_text.starts_with("Image processing failed:"));
    assert_eq!(outcome.transcript, "");
    assert_eq!(outcome.response_audio_path, None);
    assert!(inference.calls().is_empty());
    assert!(store.keys().is_empty());
}

#[tokio::test]
async fn given_audio_and_image_then_message_carries_both_parts() {
    let transcriber = Arc::new(ScriptedTranscriber::new(vec![Ok(
        TranscriptionOutcome::clear("My skin itches"),
    )]));
    let inference = Arc::new(RecordingInference::replying("Apply a cold compress."));
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::clone(&transcriber),
        Arc::clone(&inference),
        Arc::new(OkSynthesizer),
        Arc::new(MemoryStore::default()),
        models(),
        true,
    );

    let bundle = InputBundle {
        audio: Some(audio_upload()),
        image: Some(image_upload()),
    };
    service.handle(bundle).await;

    let calls = inference.calls();
    assert_eq!(calls.len(), 1);
    let (model, message) = &calls[0];
    assert_eq!(model, VISION_MODEL);
    assert!(message.has_image());
    assert_eq!(message.text(), Some("My skin itches"));
}

#[tokio::test]
async fn given_clear_primary_result_then_secondary_model_is_never_tried() {
    let transcriber = Arc::new(ScriptedTranscriber::new(vec![Ok(
        TranscriptionOutcome::clear("sore throat for two days"),
    )]));
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::clone(&transcriber),
        Arc::new(RecordingInference::replying("Gargle salt water.")),
        Arc::new(OkSynthesizer),
        Arc::new(MemoryStore::default()),
        models(),
        true,
    );

    let bundle = InputBundle {
        audio: Some(audio_upload()),
        image: None,
    };
    service.handle(bundle).await;

    assert_eq!(transcriber.models_called(), vec![PRIMARY_STT.to_string()]);
}

#[tokio::test]
async fn given_unclear_primary_result_then_exactly_one_secondary_attempt() {
    let transcriber = Arc::new(ScriptedTranscriber::new(vec![
        Ok(TranscriptionOutcome::unclear("could not transcribe")),
        Ok(TranscriptionOutcome::clear("chest feels tight")),
    ]));
    let inference = Arc::new(RecordingInference::replying("Please see a doctor soon."));
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::clone(&transcriber),
        Arc::clone(&inference),
        Arc::new(OkSynthesizer),
        Arc::new(MemoryStore::default()),
        models(),
        true,
    );

    let bundle = InputBundle {
        audio: Some(audio_upload()),
        image: None,
    };
    let outcome = service.handle(bundle).await;

    assert_eq!(
        transcriber.models_called(),
        vec![PRIMARY_STT.to_string(), SECONDARY_STT.to_string()]
    );
    assert_eq!(outcome.transcript, "chest feels tight");
}

#[tokio::test]
async fn given_primary_failure_then_escalation_is_bounded_to_one_retry() {
    let transcriber = Arc::new(ScriptedTranscriber::new(vec![
        Err(TranscriptionError::ApiRequestFailed("timeout".to_string())),
        Err(TranscriptionError::ApiRequestFailed("timeout".to_string())),
    ]));
    let inference = Arc::new(RecordingInference::replying("Take it easy today."));
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::clone(&transcriber),
        Arc::clone(&inference),
        Arc::new(OkSynthesizer),
        Arc::new(MemoryStore::default()),
        models(),
        true,
    );

    let bundle = InputBundle {
        audio: Some(audio_upload()),
        image: None,
    };
    service.handle(bundle).await;

    // Two attempts total, never more.
    assert_eq!(transcriber.models_called().len(), 2);
}

#[tokio::test]
async fn given_empty_transcription_after_escalation_then_fallback_text_reaches_inference_verbatim()
{
    let transcriber = Arc::new(ScriptedTranscriber::new(vec![
        Ok(TranscriptionOutcome::unclear("")),
        Ok(TranscriptionOutcome::clear("")),
    ]));
    let inference = Arc::new(RecordingInference::replying("Noted."));
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::clone(&transcriber),
        Arc::clone(&inference),
        Arc::new(OkSynthesizer),
        Arc::new(MemoryStore::default()),
        models(),
        true,
    );

    let bundle = InputBundle {
        audio: Some(audio_upload()),
        image: None,
    };
    let outcome = service.handle(bundle).await;

    assert_eq!(outcome.transcript, Transcript::fallback_text());
    let calls = inference.calls();
    assert_eq!(calls[0].1.text(), Some(Transcript::fallback_text()));
}

#[tokio::test]
async fn given_broken_audio_then_normalization_failure_degrades_to_fallback_transcript() {
    let transcriber = Arc::new(ScriptedTranscriber::new(vec![]));
    let inference = Arc::new(RecordingInference::replying("Noted."));
    let service = ConsultationService::new(
        Arc::new(BrokenNormalizer),
        Arc::clone(&transcriber),
        Arc::clone(&inference),
        Arc::new(OkSynthesizer),
        Arc::new(MemoryStore::default()),
        models(),
        true,
    );

    let bundle = InputBundle {
        audio: Some(audio_upload()),
        image: None,
    };
    let outcome = service.handle(bundle).await;

    // No transcription attempt without normalized audio, but the request
    // still completes through the text path.
    assert!(transcriber.models_called().is_empty());
    assert_eq!(outcome.transcript, Transcript::fallback_text());
    assert_eq!(inference.calls().len(), 1);
}

#[tokio::test]
async fn given_inference_failure_then_failure_message_is_the_response_body() {
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::new(ScriptedTranscriber::new(vec![Ok(
            TranscriptionOutcome::clear("I feel dizzy"),
        )])),
        Arc::new(RecordingInference::failing()),
        Arc::new(OkSynthesizer),
        Arc::new(MemoryStore::default()),
        models(),
        true,
    );

    let bundle = InputBundle {
        audio: Some(audio_upload()),
        image: None,
    };
    let outcome = service.handle(bundle).await;

    assert!(outcome.response_text.starts_with("Analysis failed:"));
    assert_eq!(outcome.transcript, "I feel dizzy");
}

#[tokio::test]
async fn given_synthesis_failure_then_text_is_kept_and_audio_is_omitted_with_note() {
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::new(ScriptedTranscriber::new(vec![Ok(
            TranscriptionOutcome::clear("I feel dizzy"),
        )])),
        Arc::new(RecordingInference::replying("Sit down and rest.")),
        Arc::new(FailingSynthesizer),
        Arc::new(MemoryStore::default()),
        models(),
        true,
    );

    let bundle = InputBundle {
        audio: Some(audio_upload()),
        image: None,
    };
    let outcome = service.handle(bundle).await;

    assert!(outcome.response_text.starts_with("Sit down and rest."));
    assert!(outcome.response_text.contains("Voice generation failed"));
    assert_eq!(outcome.response_audio_path, None);
}

#[tokio::test]
async fn given_successful_pipeline_then_all_artifacts_are_persisted() {
    let store = Arc::new(MemoryStore::default());
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::new(ScriptedTranscriber::new(vec![Ok(
            TranscriptionOutcome::clear("I have a headache"),
        )])),
        Arc::new(RecordingInference::replying("Rest and hydrate.")),
        Arc::new(OkSynthesizer),
        store.clone(),
        models(),
        true,
    );

    let bundle = InputBundle {
        audio: Some(audio_upload()),
        image: Some(image_upload()),
    };
    let outcome = service
        .handle_at(bundle, RequestStamp::from_secs(42))
        .await;

    assert_eq!(
        store.keys(),
        vec![
            "responses/doctor_text_response_42.txt".to_string(),
            "responses/doctor_voice_42.mp3".to_string(),
            "uploads/user_audio_42.wav".to_string(),
            "uploads/user_image_42.jpg".to_string(),
            "uploads/user_transcript_42.txt".to_string(),
        ]
    );
    assert_eq!(
        outcome.response_audio_path.as_deref(),
        Some("responses/doctor_voice_42.mp3")
    );
}

#[tokio::test]
async fn given_sequential_requests_with_distinct_stamps_then_artifacts_never_overwrite() {
    let store = Arc::new(MemoryStore::default());
    let service = ConsultationService::new(
        Arc::new(PassthroughNormalizer),
        Arc::new(ScriptedTranscriber::new(vec![
            Ok(TranscriptionOutcome::clear("first visit")),
            Ok(TranscriptionOutcome::clear("second visit")),
        ])),
        Arc::new(RecordingInference::replying("Noted.")),
        Arc::new(OkSynthesizer),
        store.clone(),
        models(),
        true,
    );

    let bundle = InputBundle {
        audio: Some(audio_upload()),
        image: None,
    };
    service
        .handle_at(bundle.clone(), RequestStamp::from_secs(100))
        .await;
    service
        .handle_at(bundle, RequestStamp::from_secs(101))
        .await;

    let first = ArtifactPath::new(ArtifactKind::PatientTranscript, RequestStamp::from_secs(100));
    let second = ArtifactPath::new(ArtifactKind::PatientTranscript, RequestStamp::from_secs(101));
    assert_eq!(store.fetch(&first).await.unwrap(), b"first visit".to_vec());
    assert_eq!(store.fetch(&second).await.unwrap(), b"second visit".to_vec());
}
