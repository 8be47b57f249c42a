//! HTTP content provider for a remote eduverse server.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;

use eduverse_core::error::{ContentError, ContentKind, MALFORMED_CONTENT_CODE};
use eduverse_core::model::{is_valid_subject, Example, Question};
use eduverse_core::traits::ContentProvider;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Content provider that talks to the eduverse HTTP API.
pub struct HttpContentProvider {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
    max_retries: u32,
    retry_delay: Duration,
}

/// Error body returned by the server.
#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
    #[serde(default)]
    code: Option<String>,
}

impl HttpContentProvider {
    /// Create a provider for `base_url` (e.g. `http://localhost:3000/api`).
    pub fn new(base_url: &str, timeout_secs: Option<u64>) -> Result<Self> {
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
            max_retries: 0,
            retry_delay: Duration::from_millis(500),
        })
    }

    /// Retry transient failures up to `max_retries` times, doubling the delay
    /// after each attempt.
    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        kind: ContentKind,
        subject: &str,
    ) -> Result<T, ContentError> {
        let url = format!("{}{}", self.base_url, path);
        let mut retry_delay = self.retry_delay;
        let mut retry = 0;

        loop {
            match self.get_json_once(&url, kind, subject).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_permanent() || retry >= self.max_retries => return Err(e),
                Err(e) => {
                    retry += 1;
                    tracing::warn!("request to {url} failed (attempt {retry}), retrying: {e}");
                    tokio::time::sleep(retry_delay).await;
                    retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
                }
            }
        }
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        url: &str,
        kind: ContentKind,
        subject: &str,
    ) -> Result<T, ContentError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ContentError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                ContentError::Network(format!(
                    "content server not reachable at {}. Is it running? Start with: eduverse serve",
                    self.base_url
                ))
            } else {
                ContentError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let api_error = serde_json::from_str::<ApiErrorBody>(&body).ok();
            let code = api_error.as_ref().and_then(|e| e.code.clone());
            let message = api_error.map(|e| e.error).unwrap_or(body);

            return Err(match status {
                404 => ContentError::NotFound {
                    kind,
                    subject: subject.to_string(),
                },
                400 => ContentError::InvalidSubject(subject.to_string()),
                _ if code.as_deref() == Some(MALFORMED_CONTENT_CODE) => ContentError::Malformed {
                    kind,
                    subject: subject.to_string(),
                    message,
                },
                _ => ContentError::Server { status, message },
            });
        }

        response.json::<T>().await.map_err(|e| ContentError::Malformed {
            kind,
            subject: subject.to_string(),
            message: format!("failed to parse response: {e}"),
        })
    }

    fn check_subject(subject: &str) -> Result<(), ContentError> {
        if is_valid_subject(subject) {
            Ok(())
        } else {
            Err(ContentError::InvalidSubject(subject.to_string()))
        }
    }
}

#[async_trait]
impl ContentProvider for HttpContentProvider {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_subjects(&self) -> Result<Vec<String>, ContentError> {
        let mut subjects: Vec<String> = self.get_json("/subjects", ContentKind::Subjects, "").await?;
        subjects.sort();
        Ok(subjects)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn examples(&self, subject: &str) -> Result<Vec<Example>, ContentError> {
        Self::check_subject(subject)?;
        self.get_json(&format!("/examples/{subject}"), ContentKind::Examples, subject)
            .await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn assessment(&self, subject: &str) -> Result<Vec<Question>, ContentError> {
        Self::check_subject(subject)?;
        self.get_json(
            &format!("/assessment/{subject}"),
            ContentKind::Assessment,
            subject,
        )
        .await
    }
}
