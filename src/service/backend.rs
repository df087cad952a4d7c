use async_trait::async_trait;

use super::error::ServiceResult;
use super::wire::{GenerateRequest, GenerateResponse, GradeRequest, GradeResponse};

/// Boundary to the remote generation/grading service.
///
/// The session engine only ever talks through this trait, so tests can drive
/// it against scripted implementations.
#[async_trait]
pub trait ExerciseBackend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> ServiceResult<GenerateResponse>;

    async fn grade(&self, request: &GradeRequest) -> ServiceResult<GradeResponse>;

    /// Resolves a server-relative audio path into a playable absolute URL.
    fn audio_url(&self, path: &str) -> String;
}
