//! Wire types for the two generation/grading endpoints.
//!
//! Shapes mirror the service contract exactly; everything the session engine
//! does not interpret (the grading key, unknown extra fields) is carried
//! opaquely so the payload round-trips unmodified at submission.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_wav: Option<String>,
}

impl GenerateRequest {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            language: None,
            speaker_wav: None,
        }
    }

    pub fn with_voice(mut self, language: Option<&str>, speaker_wav: Option<&str>) -> Self {
        self.language = language.map(String::from);
        self.speaker_wav = speaker_wav.map(String::from);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub data: ExercisePayload,
    pub audio_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePayload {
    pub text: String,
    pub multiple_choice_questions: Vec<McqPayload>,
    pub open_ended_questions: Vec<OpenPayload>,
    /// Grading key the service reads back at submission; never interpreted
    /// client-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McqPayload {
    pub question: String,
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPayload {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRequest {
    pub exercise_data: ExercisePayload,
    pub user_answers: UserAnswers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAnswers {
    pub mcq_answers: Vec<String>,
    pub open_ended_answers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResponse {
    pub feedback: FeedbackPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackPayload {
    pub mcq_feedback: Vec<Evaluation>,
    pub open_ended_feedback: Vec<Evaluation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub evaluation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_index: Option<usize>,
}

/// Failure bodies are not schema-guaranteed; every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
