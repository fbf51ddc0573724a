//! Configuration module for the Rota 67 web service.
//!
//! All configuration is loaded from environment variables. Integration
//! endpoints have no fallback values: a missing webhook or CMS URL is reported
//! when a request needs it.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::AppError;

/// Default image model used for article illustrations.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Default base URL of the generative image API.
pub const DEFAULT_IMAGE_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Automation webhook that turns a source URL into an article draft
    pub webhook_url: Option<String>,
    /// Base URL of the headless CMS
    pub cms_url: Option<String>,
    /// Bearer token for CMS requests
    pub cms_api_token: Option<String>,
    /// API key for the generative image API
    pub image_api_key: Option<String>,
    /// Image model name
    pub image_model: String,
    /// Base URL of the generative image API
    pub image_api_url: String,
    /// Optional timeout applied to every outbound request
    pub upstream_timeout: Option<Duration>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let webhook_url = non_empty_var("N8N_WEBHOOK");
        let cms_url = non_empty_var("STRAPI_URL").map(|u| u.trim_end_matches('/').to_string());
        let cms_api_token = non_empty_var("STRAPI_API_KEY");
        let image_api_key = non_empty_var("GEMINI_API_KEY");

        let image_model =
            non_empty_var("GEMINI_IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());

        let image_api_url = non_empty_var("GEMINI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_IMAGE_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let upstream_timeout = match non_empty_var("ROTA67_UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    AppError::Config(format!("Invalid ROTA67_UPSTREAM_TIMEOUT_SECS: {}", raw))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let bind_addr = env::var("ROTA67_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid ROTA67_BIND_ADDR format: {}", bind_addr)))?;

        let log_level = env::var("ROTA67_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("ROTA67_LOG_FORMAT")
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            webhook_url,
            cms_url,
            cms_api_token,
            image_api_key,
            image_model,
            image_api_url,
            upstream_timeout,
            bind_addr,
            log_level,
            log_json,
        })
    }

    /// Webhook URL, or a configuration error naming the missing variable.
    pub fn require_webhook_url(&self) -> Result<&str, AppError> {
        self.webhook_url
            .as_deref()
            .ok_or_else(|| AppError::Config("N8N_WEBHOOK is not defined".to_string()))
    }

    /// CMS base URL, or a configuration error naming the missing variable.
    pub fn require_cms_url(&self) -> Result<&str, AppError> {
        self.cms_url
            .as_deref()
            .ok_or_else(|| AppError::Config("STRAPI_URL is not defined".to_string()))
    }

    /// Build the shared outbound HTTP client.
    pub fn http_client(&self) -> Result<reqwest::Client, AppError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = self.upstream_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
