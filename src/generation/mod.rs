//! Client for the article-generation webhook.
//!
//! The webhook runs an external automation workflow that scrapes the source
//! article and returns adapted text. Calls are not idempotent: every request
//! triggers a new workflow execution.

use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::errors::AppError;
use crate::models::{ArticleDraft, NewsGenerationRequest};

/// User-facing message for a rejected source URL.
pub const INVALID_URL_MESSAGE: &str = "Por favor, insira uma URL válida";

/// Generation client errors.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Input is not an absolute http(s) URL
    #[error("{}", INVALID_URL_MESSAGE)]
    InvalidUrl,

    /// Webhook answered with a non-2xx status
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// Webhook unreachable, timed out, or the connection dropped
    #[error("Unknown error: {0}")]
    Transport(String),

    /// Webhook answered 2xx with a body that is not a draft
    #[error("Invalid webhook response: {0}")]
    Decode(String),
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::InvalidUrl => AppError::Validation(err.to_string()),
            GenerationError::Status { status, .. } => AppError::Upstream {
                status: Some(status),
                message: err.to_string(),
            },
            GenerationError::Transport(_) | GenerationError::Decode(_) => AppError::Upstream {
                status: None,
                message: err.to_string(),
            },
        }
    }
}

/// Check that `raw` is an absolute http or https URL with a host.
pub fn validate_source_url(raw: &str) -> Result<Url, GenerationError> {
    let parsed = Url::parse(raw.trim()).map_err(|_| GenerationError::InvalidUrl)?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(parsed),
        _ => Err(GenerationError::InvalidUrl),
    }
}

/// Posts source URLs to the generation webhook.
#[derive(Clone)]
pub struct WebhookClient {
    http: Client,
    endpoint: String,
}

impl WebhookClient {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Generate an article draft from a source article URL.
    ///
    /// The URL is validated before any request is made.
    pub async fn generate(&self, url: &str) -> Result<ArticleDraft, GenerationError> {
        let source = validate_source_url(url)?;
        let body = NewsGenerationRequest {
            url: url.trim().to_string(),
        };

        tracing::info!(source = %source, "Calling generation webhook");

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = resp.status();
        tracing::debug!(status = status.as_u16(), "Generation webhook responded");

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let draft: ArticleDraft = resp.json().await.map_err(|e| {
            if e.is_decode() {
                GenerationError::Decode(e.to_string())
            } else {
                GenerationError::Transport(e.to_string())
            }
        })?;

        tracing::info!(slug = %draft.slug, title = %draft.title, "Draft generated");
        Ok(draft)
    }
}
