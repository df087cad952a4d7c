use crate::service::wire::{Evaluation, FeedbackPayload};
use crate::service::{ServiceError, ServiceResult};

use super::exercise::Exercise;

/// Grading result for one submission, aligned by position with the exercise
/// and answer set that produced it. Only constructed after the arrays have
/// been checked against the live question counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    mcq: Vec<String>,
    open: Vec<String>,
}

impl Feedback {
    pub fn from_wire(payload: FeedbackPayload, exercise: &Exercise) -> ServiceResult<Self> {
        let mcq = aligned(
            payload.mcq_feedback,
            exercise.multiple_choice().len(),
            "mcq_feedback",
        )?;
        let open = aligned(
            payload.open_ended_feedback,
            exercise.open_ended().len(),
            "open_ended_feedback",
        )?;

        Ok(Self { mcq, open })
    }

    pub fn mcq(&self) -> &[String] {
        &self.mcq
    }

    pub fn open(&self) -> &[String] {
        &self.open
    }
}

fn aligned(
    entries: Vec<Evaluation>,
    expected: usize,
    field: &str,
) -> ServiceResult<Vec<String>> {
    if entries.len() != expected {
        return Err(ServiceError::malformed(format!(
            "{field} has {} entries, exercise has {expected} questions",
            entries.len()
        )));
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(position, entry)| {
            // question_index is optional on the wire; when present it must
            // agree with the entry's position.
            match entry.question_index {
                Some(index) if index != position => Err(ServiceError::malformed(format!(
                    "{field} entry {position} claims question_index {index}"
                ))),
                _ => Ok(entry.evaluation),
            }
        })
        .collect()
}
