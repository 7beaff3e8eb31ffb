//! OpenAI Transport Implementation
//!
//! Talks to any OpenAI-compatible chat completion endpoint.
//!
//! # Features
//!
//! - Bearer-token authentication with a per-instance credential
//! - Configurable endpoint, optional request timeout
//! - Optional retries with exponential backoff (off by default)
//! - HTTP status codes mapped onto distinct [`LlmError`] kinds
//!
//! # Examples
//!
//! ```no_run
//! use paperlens_llm::{ApiKey, OpenAiTransport};
//!
//! let transport = OpenAiTransport::new("https://api.openai.com/v1", ApiKey::new("sk-..."))
//!     .unwrap()
//!     .with_max_attempts(3);
//! ```

use crate::config::ClientConfig;
use crate::credentials::ApiKey;
use crate::request::{ChatRequest, ChatResponse};
use crate::transport::ChatTransport;
use crate::LlmError;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default OpenAI API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Chat completion transport over HTTP
#[derive(Debug)]
pub struct OpenAiTransport {
    endpoint: String,
    api_key: ApiKey,
    client: reqwest::Client,
    max_attempts: u32,
}

/// Error envelope returned by OpenAI-compatible APIs
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiTransport {
    /// Create a transport with no timeout and a single attempt
    pub fn new(endpoint: impl Into<String>, api_key: ApiKey) -> Result<Self, LlmError> {
        Self::build(endpoint.into(), api_key, None)
    }

    /// Create a transport from client configuration
    pub fn from_config(config: &ClientConfig, api_key: ApiKey) -> Result<Self, LlmError> {
        let transport = Self::build(config.endpoint.clone(), api_key, config.timeout())?;
        Ok(transport.with_max_attempts(config.max_attempts))
    }

    fn build(
        endpoint: String,
        api_key: ApiKey,
        timeout: Option<Duration>,
    ) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            client,
            max_attempts: 1,
        })
    }

    /// Set the total number of attempts per request (minimum 1)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Full URL of the chat completion route
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }

    async fn send_once(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(error_for_status(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;
        serde_json::from_str(&body)
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

impl ChatTransport for OpenAiTransport {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let mut attempts = 0;

        loop {
            attempts += 1;
            match self.send_once(request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempts < self.max_attempts => {
                    // Exponential backoff: 1s, 2s, 4s, etc.
                    let delay = Duration::from_secs(2u64.pow(attempts - 1));
                    warn!(attempt = attempts, error = %e, ?delay, "retrying chat completion");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    debug!(attempts, error = %e, "chat completion failed");
                    return Err(e);
                }
            }
        }
    }
}

/// Map a non-success HTTP status onto an error kind
fn error_for_status(status: StatusCode, body: &str) -> LlmError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string());
    let detail = format!("HTTP {}: {}", status.as_u16(), message);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth(detail),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited(detail),
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
            LlmError::InvalidRequest(detail)
        }
        _ => LlmError::Communication(detail),
    }
}
