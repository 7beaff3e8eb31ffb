//! Paperlens Completion Client
//!
//! Sends assembled article text to a hosted chat-completion API.
//!
//! # Architecture
//!
//! ```text
//! text → Tokenizer (count / truncate) → ChatRequest → ChatTransport → reply
//! ```
//!
//! `CompletionClient` owns its model identifier and credential; nothing is
//! stored in process-wide state. The transport is a trait so tests can use
//! [`MockTransport`] instead of the network.
//!
//! # Transports
//!
//! - `MockTransport`: scripted replies and failures for testing
//! - `OpenAiTransport`: OpenAI-compatible `/chat/completions` over HTTP
//!
//! # Examples
//!
//! ```
//! use paperlens_llm::{CompletionClient, MockTransport};
//!
//! # async fn example() -> Result<(), paperlens_llm::LlmError> {
//! let client = CompletionClient::with_transport("gpt-3.5-turbo", MockTransport::new("Looks good."))?;
//! assert_eq!(client.send_query("Review this paper").await?, "Looks good.");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod credentials;
mod request;
mod tokenizer;
mod transport;

pub mod openai;

pub use client::{CompletionClient, QUERY_ERROR_SENTINEL, SYSTEM_INSTRUCTION};
pub use config::{ClientConfig, DEFAULT_MODEL};
pub use credentials::{ApiKey, DEFAULT_KEY_FILE};
pub use openai::OpenAiTransport;
pub use request::{ChatMessage, ChatRequest, ChatResponse, Choice, ChoiceMessage, Role, Usage};
pub use tokenizer::{Tokenizer, CODE_FENCE};
pub use transport::{ChatTransport, MockTransport};

use thiserror::Error;

/// Errors that can occur during completion client operations
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    /// Missing credential or invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// No tokenizer is known for the model
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Credential rejected by the provider
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Provider rejected the request (bad model, oversized prompt, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider reply could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Reply contained no completion text
    #[error("Model returned no completion")]
    EmptyResponse,
}

impl LlmError {
    /// Whether repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LlmError::Communication(_) | LlmError::RateLimited(_))
    }
}
