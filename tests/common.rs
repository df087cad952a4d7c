use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use escucha::media::MediaPlayer;
use escucha::service::wire::{GenerateRequest, GenerateResponse, GradeRequest, GradeResponse};
use escucha::service::{ExerciseBackend, ServiceError, ServiceResult};

/// Backend fake: canned responses in order, every received request recorded.
/// Clone the handle before moving it into a session to keep access to the
/// logs.
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    generate_script: Mutex<VecDeque<ServiceResult<GenerateResponse>>>,
    grade_script: Mutex<VecDeque<ServiceResult<GradeResponse>>>,
    generate_log: Mutex<Vec<GenerateRequest>>,
    grade_log: Mutex<Vec<GradeRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_generate(self, result: ServiceResult<GenerateResponse>) -> Self {
        self.inner.generate_script.lock().unwrap().push_back(result);
        self
    }

    pub fn on_grade(self, result: ServiceResult<GradeResponse>) -> Self {
        self.inner.grade_script.lock().unwrap().push_back(result);
        self
    }

    pub fn generate_requests(&self) -> Vec<GenerateRequest> {
        self.inner.generate_log.lock().unwrap().clone()
    }

    pub fn grade_requests(&self) -> Vec<GradeRequest> {
        self.inner.grade_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExerciseBackend for ScriptedBackend {
    async fn generate(&self, request: &GenerateRequest) -> ServiceResult<GenerateResponse> {
        self.inner.generate_log.lock().unwrap().push(request.clone());
        self.inner
            .generate_script
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted generate response left")
    }

    async fn grade(&self, request: &GradeRequest) -> ServiceResult<GradeResponse> {
        self.inner.grade_log.lock().unwrap().push(request.clone());
        self.inner
            .grade_script
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted grade response left")
    }

    fn audio_url(&self, path: &str) -> String {
        format!("http://service.test{path}?t=0")
    }
}

/// Player fake recording every URL it was asked to play.
#[derive(Clone, Default)]
pub struct RecordingPlayer {
    played: Arc<Mutex<Vec<String>>>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<String> {
        self.played.lock().unwrap().clone()
    }
}

impl MediaPlayer for RecordingPlayer {
    fn play(&self, url: &str) -> std::io::Result<()> {
        self.played.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub fn exercise_response(mcq: usize, open: usize, text: &str) -> GenerateResponse {
    serde_json::from_value(json!({
        "data": {
            "text": text,
            "multiple_choice_questions": (0..mcq)
                .map(|i| json!({
                    "question": format!("¿Pregunta {i}?"),
                    "options": {"A": "una", "B": "otra"}
                }))
                .collect::<Vec<_>>(),
            "open_ended_questions": (0..open)
                .map(|i| json!({"question": format!("Completa {i}: ____")}))
                .collect::<Vec<_>>(),
            "answers": {
                "multiple_choice": (0..mcq).map(|_| "B").collect::<Vec<_>>(),
                "open_ended": (0..open).map(|_| "respuesta").collect::<Vec<_>>()
            },
            "difficulty": "B1"
        },
        "audio_url": "/api/audio"
    }))
    .unwrap()
}

pub fn feedback_response(mcq: usize, open: usize) -> GradeResponse {
    serde_json::from_value(json!({
        "feedback": {
            "mcq_feedback": (0..mcq)
                .map(|i| json!({"evaluation": format!("Correct ({i})"), "question_index": i}))
                .collect::<Vec<_>>(),
            "open_ended_feedback": (0..open)
                .map(|i| json!({"evaluation": format!("Incorrect ({i})")}))
                .collect::<Vec<_>>(),
        }
    }))
    .unwrap()
}

pub fn service_failure() -> ServiceError {
    ServiceError::status(500, "An error occurred while processing the request")
}
