use std::collections::BTreeMap;
use std::fmt;

use uuid::Uuid;

use crate::service::wire::ExercisePayload;
use crate::service::{ServiceError, ServiceResult};

/// Stable identifier assigned to every question when an exercise is
/// accepted. Survives re-renders; positional indices are only a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionId(Uuid);

impl QuestionId {
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub struct McQuestion {
    id: QuestionId,
    question: String,
    options: BTreeMap<String, String>,
}

impl McQuestion {
    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }
}

#[derive(Debug, Clone)]
pub struct OpenQuestion {
    id: QuestionId,
    question: String,
}

impl OpenQuestion {
    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }
}

/// A generated exercise, immutable once accepted.
///
/// The wire payload is retained verbatim: the grading service is stateless
/// and re-reads the whole exercise (including its grading key) from the
/// submission body.
#[derive(Debug, Clone)]
pub struct Exercise {
    payload: ExercisePayload,
    multiple_choice: Vec<McQuestion>,
    open_ended: Vec<OpenQuestion>,
}

impl Exercise {
    /// Accepts a wire payload, assigning fresh question ids.
    ///
    /// The payload shape is already enforced by deserialization; what is
    /// checked here is internal consistency a well-formed service never
    /// violates, like an option-less multiple-choice question.
    pub fn from_payload(payload: ExercisePayload) -> ServiceResult<Self> {
        for (idx, mcq) in payload.multiple_choice_questions.iter().enumerate() {
            if mcq.options.is_empty() {
                return Err(ServiceError::malformed(format!(
                    "multiple-choice question {idx} has no options"
                )));
            }
        }

        let multiple_choice = payload
            .multiple_choice_questions
            .iter()
            .map(|q| McQuestion {
                id: QuestionId::fresh(),
                question: q.question.clone(),
                options: q.options.clone(),
            })
            .collect();

        let open_ended = payload
            .open_ended_questions
            .iter()
            .map(|q| OpenQuestion {
                id: QuestionId::fresh(),
                question: q.question.clone(),
            })
            .collect();

        Ok(Self {
            payload,
            multiple_choice,
            open_ended,
        })
    }

    pub fn text(&self) -> &str {
        &self.payload.text
    }

    pub fn multiple_choice(&self) -> &[McQuestion] {
        &self.multiple_choice
    }

    pub fn open_ended(&self) -> &[OpenQuestion] {
        &self.open_ended
    }

    /// The payload exactly as the service returned it.
    pub fn payload(&self) -> &ExercisePayload {
        &self.payload
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn payload(raw: serde_json::Value) -> ExercisePayload {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn from_payload_assigns_distinct_ids() {
        let exercise = Exercise::from_payload(payload(json!({
            "text": "Hola",
            "multiple_choice_questions": [
                {"question": "q1", "options": {"A": "a", "B": "b"}},
                {"question": "q2", "options": {"A": "a", "B": "b"}}
            ],
            "open_ended_questions": [{"question": "q3"}]
        })))
        .unwrap();

        assert_eq!(exercise.multiple_choice().len(), 2);
        assert_eq!(exercise.open_ended().len(), 1);

        let first = exercise.multiple_choice()[0].id();
        let second = exercise.multiple_choice()[1].id();
        assert_ne!(first, second);
        assert_ne!(first, exercise.open_ended()[0].id());
    }

    #[test]
    fn from_payload_rejects_optionless_mcq() {
        let result = Exercise::from_payload(payload(json!({
            "text": "Hola",
            "multiple_choice_questions": [{"question": "q1", "options": {}}],
            "open_ended_questions": []
        })));

        assert!(matches!(
            result,
            Err(ServiceError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn empty_question_sets_are_accepted() {
        let exercise = Exercise::from_payload(payload(json!({
            "text": "Hola",
            "multiple_choice_questions": [],
            "open_ended_questions": []
        })))
        .unwrap();

        assert!(exercise.multiple_choice().is_empty());
        assert!(exercise.open_ended().is_empty());
    }
}
