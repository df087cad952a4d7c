mod answers;
pub use answers::{AnswerSet, AnswerSlot, QuestionKind};

mod controller;
pub use controller::{
    ApplyOutcome, Generation, SessionController, SessionFailure, SessionPhase,
};

mod error;
pub use error::{SessionError, SessionResult};

mod exercise;
pub use exercise::{Exercise, McQuestion, OpenQuestion, QuestionId};

mod feedback;
pub use feedback::Feedback;

use crate::media::MediaPlayer;
use crate::service::ExerciseBackend;
use crate::service::wire::GenerateRequest;

/// Couples the state controller to a backend and a player and drives the
/// begin/apply transitions around the actual network calls.
pub struct ExerciseSession<B> {
    controller: SessionController,
    backend: B,
    player: Box<dyn MediaPlayer>,
    language: Option<String>,
    speaker_wav: Option<String>,
}

impl<B: ExerciseBackend> ExerciseSession<B> {
    pub fn new(backend: B, player: Box<dyn MediaPlayer>) -> Self {
        Self {
            controller: SessionController::new(),
            backend,
            player,
            language: None,
            speaker_wav: None,
        }
    }

    pub fn with_voice(mut self, language: Option<&str>, speaker_wav: Option<&str>) -> Self {
        self.language = language.map(String::from);
        self.speaker_wav = speaker_wav.map(String::from);
        self
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn set_prompt<S: Into<String>>(&mut self, prompt: S) {
        self.controller.set_prompt(prompt);
    }

    pub fn set_answer(
        &mut self,
        kind: QuestionKind,
        index: usize,
        value: &str,
    ) -> SessionResult<()> {
        self.controller.set_answer(kind, index, value)
    }

    pub fn answer(&mut self, id: QuestionId, value: &str) -> SessionResult<()> {
        self.controller.answer(id, value)
    }

    /// Requests a fresh exercise for the current prompt.
    #[tracing::instrument(skip(self))]
    pub async fn generate(&mut self) -> ApplyOutcome {
        let generation = self.controller.begin_generation();
        let request = GenerateRequest::new(self.controller.prompt())
            .with_voice(self.language.as_deref(), self.speaker_wav.as_deref());

        let result = self.backend.generate(&request).await;
        self.controller.apply_generation(generation, result)
    }

    /// Submits the current answers for grading.
    #[tracing::instrument(skip(self))]
    pub async fn submit(&mut self) -> SessionResult<ApplyOutcome> {
        let (generation, request) = self.controller.begin_submission()?;

        let result = self.backend.grade(&request).await;
        Ok(self.controller.apply_submission(generation, result))
    }

    /// Fires playback of the current exercise's audio and forgets about it.
    /// Nothing is recorded on completion; a player that fails to start is
    /// only logged.
    pub fn play_audio(&self) -> SessionResult<()> {
        let path = self.controller.audio_path()?;
        let url = self.backend.audio_url(path);

        if let Err(error) = self.player.play(&url) {
            tracing::warn!(%error, %url, "audio playback failed to start");
        }
        Ok(())
    }
}
