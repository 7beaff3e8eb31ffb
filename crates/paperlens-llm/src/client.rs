//! Completion client: token accounting plus a single chat round-trip

use crate::config::ClientConfig;
use crate::credentials::ApiKey;
use crate::openai::OpenAiTransport;
use crate::request::{ChatMessage, ChatRequest};
use crate::tokenizer::Tokenizer;
use crate::transport::ChatTransport;
use crate::LlmError;
use tracing::{info, warn};

/// System message sent ahead of every user prompt
pub const SYSTEM_INSTRUCTION: &str =
    "You are ChatGPT, a large language model trained by OpenAI. Answer as concisely as possible.";

/// Reply returned by [`CompletionClient::send_query_or_sentinel`] on failure
pub const QUERY_ERROR_SENTINEL: &str = "Error in processing the query.";

/// Chat completion client bound to one model and one transport
#[derive(Debug)]
pub struct CompletionClient<T> {
    model: String,
    tokenizer: Tokenizer,
    transport: T,
}

impl CompletionClient<OpenAiTransport> {
    /// Create a client that talks to the configured HTTP endpoint
    ///
    /// The credential is `api_key` when given, otherwise the contents of
    /// `config.key_file`.
    ///
    /// # Errors
    ///
    /// - [`LlmError::Config`] for invalid configuration or a missing credential
    /// - [`LlmError::Tokenizer`] when the model has no known tokenizer
    pub fn new(config: &ClientConfig, api_key: Option<String>) -> Result<Self, LlmError> {
        config.validate()?;
        let api_key = ApiKey::resolve(api_key, &config.key_file)?;
        let transport = OpenAiTransport::from_config(config, api_key)?;
        Self::with_transport(config.model.clone(), transport)
    }
}

impl<T: ChatTransport> CompletionClient<T> {
    /// Create a client over an arbitrary transport
    pub fn with_transport(model: impl Into<String>, transport: T) -> Result<Self, LlmError> {
        let model = model.into();
        let tokenizer = Tokenizer::for_model(&model)?;
        Ok(Self {
            model,
            tokenizer,
            transport,
        })
    }

    /// Configured model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Tokenizer matched to the model
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Number of model tokens in `text`
    pub fn count_tokens(&self, text: &str) -> usize {
        self.tokenizer.count(text)
    }

    /// Cut `text` to `max_tokens` tokens and close it with a code fence
    pub fn truncate(&self, text: &str, max_tokens: usize) -> String {
        self.tokenizer.truncate(text, max_tokens)
    }

    /// Assemble the request for `user_content` asking for `n` completions
    pub fn build_request(&self, user_content: &str, n: u32) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_INSTRUCTION),
                ChatMessage::user(user_content),
            ],
            n,
        }
    }

    /// Ask for one completion and return its text
    pub async fn send_query(&self, user_content: &str) -> Result<String, LlmError> {
        self.send_query_n(user_content, 1).await
    }

    /// Ask for `n` completions and return the text of the first
    pub async fn send_query_n(&self, user_content: &str, n: u32) -> Result<String, LlmError> {
        let num_tokens = self.count_tokens(user_content);
        info!(tokens = num_tokens, model = %self.model, "tokens sent to model");

        let request = self.build_request(user_content, n);
        let response = self.transport.complete(&request).await?;

        if let Some(usage) = &response.usage {
            info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "provider token usage"
            );
        }

        response
            .first_text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyResponse)
    }

    /// Like [`send_query`](Self::send_query), but any failure is logged and
    /// replaced by [`QUERY_ERROR_SENTINEL`]
    pub async fn send_query_or_sentinel(&self, user_content: &str) -> String {
        match self.send_query(user_content).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "error in send_query");
                QUERY_ERROR_SENTINEL.to_string()
            }
        }
    }
}
