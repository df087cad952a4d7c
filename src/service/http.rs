use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backend::ExerciseBackend;
use super::error::{ServiceError, ServiceResult};
use super::wire::{ErrorBody, GenerateRequest, GenerateResponse, GradeRequest, GradeResponse};

const GENERATE_PATH: &str = "/api/chat";
const GRADE_PATH: &str = "/api/submit_answers";

/// HTTP connection to the exercise service.
///
/// One shared client, one base address; the request timeout applies to both
/// endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn connect(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> ServiceResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "sending request");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            // Failure bodies are not schema-guaranteed; take a description if
            // one is there, otherwise report the bare status.
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| status.to_string());

            tracing::warn!(status = status.as_u16(), %message, "service returned failure");
            return Err(ServiceError::status(status.as_u16(), message));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::malformed(e.to_string()))
    }
}

#[async_trait]
impl ExerciseBackend for HttpBackend {
    #[tracing::instrument(skip(self, request))]
    async fn generate(&self, request: &GenerateRequest) -> ServiceResult<GenerateResponse> {
        self.post_json(GENERATE_PATH, request).await
    }

    #[tracing::instrument(skip(self, request))]
    async fn grade(&self, request: &GradeRequest) -> ServiceResult<GradeResponse> {
        self.post_json(GRADE_PATH, request).await
    }

    fn audio_url(&self, path: &str) -> String {
        // Timestamp query defeats the service's single-file audio cache.
        format!(
            "{}{}?t={}",
            self.base_url,
            path,
            chrono::Utc::now().timestamp_millis()
        )
    }
}
