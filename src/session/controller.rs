use std::fmt;

use tracing::{debug, info, warn};

use crate::service::wire::{GenerateResponse, GradeRequest, GradeResponse};
use crate::service::{ServiceError, ServiceResult};

use super::answers::{AnswerSet, QuestionKind};
use super::error::{SessionError, SessionResult};
use super::exercise::{Exercise, QuestionId};
use super::feedback::Feedback;

/// Monotonic request generation. Every response carries the generation it
/// was issued under; anything not matching the current one is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What became of a response handed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Discarded,
}

/// Generic failure indicator surfaced to the user in place of wire details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFailure {
    Generation,
    Grading,
}

/// Display state derived from the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NoExercise,
    Unanswered,
    PartiallyAnswered,
    Answered,
    Reviewed,
}

#[derive(Debug)]
struct LoadedExercise {
    exercise: Exercise,
    answers: AnswerSet,
}

/// Sole owner of all session state: the prompt, the loaded exercise with its
/// answer set, the latest feedback, and the request generation counter.
///
/// The controller is purely synchronous. Asynchronous operations are split
/// into a `begin_*` transition taken before the request goes out and an
/// `apply_*` transition taken when the response arrives; `apply_*` checks
/// the generation before touching anything, so a stale response can never
/// overwrite fresher state or attach feedback to the wrong question set.
#[derive(Debug, Default)]
pub struct SessionController {
    prompt: String,
    generation: u64,
    loaded: Option<LoadedExercise>,
    audio: Option<String>,
    feedback: Option<Feedback>,
    failure: Option<SessionFailure>,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt<S: Into<String>>(&mut self, prompt: S) {
        self.prompt = prompt.into();
    }

    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    pub fn exercise(&self) -> Option<&Exercise> {
        self.loaded.as_ref().map(|l| &l.exercise)
    }

    pub fn answers(&self) -> Option<&AnswerSet> {
        self.loaded.as_ref().map(|l| &l.answers)
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn failure(&self) -> Option<SessionFailure> {
        self.failure
    }

    pub fn phase(&self) -> SessionPhase {
        let Some(loaded) = &self.loaded else {
            return SessionPhase::NoExercise;
        };

        if self.feedback.is_some() {
            return SessionPhase::Reviewed;
        }

        match loaded.answers.answered() {
            0 if loaded.answers.total() > 0 => SessionPhase::Unanswered,
            n if n < loaded.answers.total() => SessionPhase::PartiallyAnswered,
            _ => SessionPhase::Answered,
        }
    }

    /// Opens a new request generation.
    ///
    /// From this point the previous exercise's audio is void and any stored
    /// feedback belongs to an exercise that is being replaced, so both are
    /// dropped immediately rather than when the response lands.
    pub fn begin_generation(&mut self) -> Generation {
        self.generation += 1;
        self.audio = None;
        self.feedback = None;
        self.failure = None;

        debug!(generation = self.generation, "generation request opened");
        Generation(self.generation)
    }

    /// Applies a generation response, or discards it if the session has
    /// moved on to a newer generation.
    pub fn apply_generation(
        &mut self,
        generation: Generation,
        result: ServiceResult<GenerateResponse>,
    ) -> ApplyOutcome {
        if generation.0 != self.generation {
            warn!(
                response = generation.0,
                current = self.generation,
                "discarding stale generation response"
            );
            return ApplyOutcome::Discarded;
        }

        let accepted = result.and_then(|response| {
            Exercise::from_payload(response.data).map(|exercise| (exercise, response.audio_url))
        });

        match accepted {
            Ok((exercise, audio)) => {
                let answers = AnswerSet::for_exercise(&exercise);
                info!(
                    mcq = exercise.multiple_choice().len(),
                    open = exercise.open_ended().len(),
                    "exercise loaded"
                );

                self.loaded = Some(LoadedExercise { exercise, answers });
                self.audio = Some(audio);
            }
            Err(error) => self.fail_generation(&error),
        }

        ApplyOutcome::Applied
    }

    /// A failed reload leaves no exercise behind; a stale one next to the
    /// failure banner would read as current. The prompt is kept as typed.
    fn fail_generation(&mut self, error: &ServiceError) {
        warn!(%error, "exercise generation failed");
        self.loaded = None;
        self.audio = None;
        self.feedback = None;
        self.failure = Some(SessionFailure::Generation);
    }

    pub fn set_answer(
        &mut self,
        kind: QuestionKind,
        index: usize,
        value: &str,
    ) -> SessionResult<()> {
        let loaded = self.loaded.as_mut().ok_or(SessionError::NoExerciseLoaded)?;
        loaded.answers.set(kind, index, value)
    }

    pub fn answer(&mut self, id: QuestionId, value: &str) -> SessionResult<()> {
        let loaded = self.loaded.as_mut().ok_or(SessionError::NoExerciseLoaded)?;
        loaded.answers.set_by_id(id, value)
    }

    /// Snapshots the current exercise and answers for grading.
    ///
    /// The exercise payload goes back verbatim; the grading service is
    /// stateless and re-reads it from the submission body.
    pub fn begin_submission(&self) -> SessionResult<(Generation, GradeRequest)> {
        let loaded = self.loaded.as_ref().ok_or(SessionError::NoExerciseLoaded)?;

        debug!(generation = self.generation, "submission opened");
        Ok((
            Generation(self.generation),
            GradeRequest {
                exercise_data: loaded.exercise.payload().clone(),
                user_answers: loaded.answers.snapshot(),
            },
        ))
    }

    /// Applies a grading response against the question set that is live
    /// right now; anything from an earlier generation is discarded.
    pub fn apply_submission(
        &mut self,
        generation: Generation,
        result: ServiceResult<GradeResponse>,
    ) -> ApplyOutcome {
        if generation.0 != self.generation {
            warn!(
                response = generation.0,
                current = self.generation,
                "discarding feedback for a replaced exercise"
            );
            return ApplyOutcome::Discarded;
        }

        let Some(loaded) = &self.loaded else {
            warn!("discarding feedback, no exercise is loaded");
            return ApplyOutcome::Discarded;
        };

        match result.and_then(|response| Feedback::from_wire(response.feedback, &loaded.exercise))
        {
            Ok(feedback) => {
                info!(
                    mcq = feedback.mcq().len(),
                    open = feedback.open().len(),
                    "feedback received"
                );
                self.feedback = Some(feedback);
                self.failure = None;
            }
            Err(error) => {
                // Prior feedback, if any, stays as it was.
                warn!(%error, "grading failed");
                self.failure = Some(SessionFailure::Grading);
            }
        }

        ApplyOutcome::Applied
    }

    /// The audio reference for the currently loaded exercise. Void from the
    /// moment a newer generation request is opened.
    pub fn audio_path(&self) -> SessionResult<&str> {
        if self.loaded.is_none() {
            return Err(SessionError::NoExerciseLoaded);
        }

        self.audio.as_deref().ok_or(SessionError::NoAudio)
    }
}
