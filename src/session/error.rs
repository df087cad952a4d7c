use thiserror::Error;

use super::answers::QuestionKind;
use super::exercise::QuestionId;

pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Local precondition violations. These come from stale UI references or
/// programmer error, never from the network, and are guarded explicitly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no exercise is loaded")]
    NoExerciseLoaded,

    #[error("{kind} answer index {index} out of bounds, question count is {len}")]
    AnswerOutOfBounds {
        kind: QuestionKind,
        index: usize,
        len: usize,
    },

    #[error("unknown question id: {id}")]
    UnknownQuestion { id: QuestionId },

    #[error("no audio is available for the current exercise")]
    NoAudio,
}
