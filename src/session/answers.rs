use std::fmt;

use crate::service::wire::UserAnswers;

use super::error::{SessionError, SessionResult};
use super::exercise::{Exercise, QuestionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice,
    OpenEnded,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleChoice => write!(f, "multiple-choice"),
            Self::OpenEnded => write!(f, "open-ended"),
        }
    }
}

/// One answer slot, bound to its question for the lifetime of the exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSlot {
    question: QuestionId,
    value: String,
}

impl AnswerSlot {
    fn empty(question: QuestionId) -> Self {
        Self {
            question,
            value: String::new(),
        }
    }

    pub fn question(&self) -> QuestionId {
        self.question
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_answered(&self) -> bool {
        !self.value.is_empty()
    }
}

/// The user's in-progress answers, one slot per question in exercise order.
///
/// Slot counts always match the exercise that created the set; edits
/// overwrite a single slot and never reorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    mcq: Vec<AnswerSlot>,
    open: Vec<AnswerSlot>,
}

impl AnswerSet {
    pub fn for_exercise(exercise: &Exercise) -> Self {
        Self {
            mcq: exercise
                .multiple_choice()
                .iter()
                .map(|q| AnswerSlot::empty(q.id()))
                .collect(),
            open: exercise
                .open_ended()
                .iter()
                .map(|q| AnswerSlot::empty(q.id()))
                .collect(),
        }
    }

    pub fn mcq(&self) -> &[AnswerSlot] {
        &self.mcq
    }

    pub fn open(&self) -> &[AnswerSlot] {
        &self.open
    }

    pub fn set(&mut self, kind: QuestionKind, index: usize, value: &str) -> SessionResult<()> {
        let slots = match kind {
            QuestionKind::MultipleChoice => &mut self.mcq,
            QuestionKind::OpenEnded => &mut self.open,
        };

        let len = slots.len();
        let slot = slots
            .get_mut(index)
            .ok_or(SessionError::AnswerOutOfBounds { kind, index, len })?;

        slot.value = value.to_string();
        Ok(())
    }

    pub fn set_by_id(&mut self, id: QuestionId, value: &str) -> SessionResult<()> {
        let slot = self
            .mcq
            .iter_mut()
            .chain(self.open.iter_mut())
            .find(|slot| slot.question == id)
            .ok_or(SessionError::UnknownQuestion { id })?;

        slot.value = value.to_string();
        Ok(())
    }

    pub fn answered(&self) -> usize {
        self.mcq
            .iter()
            .chain(self.open.iter())
            .filter(|s| s.is_answered())
            .count()
    }

    pub fn total(&self) -> usize {
        self.mcq.len() + self.open.len()
    }

    pub fn is_complete(&self) -> bool {
        self.answered() == self.total()
    }

    /// Full copy in wire order, read at submission time.
    pub fn snapshot(&self) -> UserAnswers {
        UserAnswers {
            mcq_answers: self.mcq.iter().map(|s| s.value.clone()).collect(),
            open_ended_answers: self.open.iter().map(|s| s.value.clone()).collect(),
        }
    }
}
