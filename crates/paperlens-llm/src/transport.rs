//! Transport seam between the client and a completion provider

use crate::request::{ChatRequest, ChatResponse};
use crate::LlmError;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

/// Something that can answer a chat completion request
pub trait ChatTransport {
    /// Send one request and return the provider's response
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, LlmError>> + Send;
}

/// Mock transport for deterministic testing
///
/// Returns pre-configured replies keyed by user message content without
/// making any network calls. Clones share their call log.
///
/// # Examples
///
/// ```
/// use paperlens_llm::{ChatMessage, ChatRequest, ChatTransport, LlmError, MockTransport};
///
/// # async fn example() {
/// let mut transport = MockTransport::default();
/// transport.add_response("prompt1", "response1");
/// transport.add_error("prompt2", LlmError::RateLimited("slow down".into()));
///
/// let request = ChatRequest {
///     model: "gpt-4".into(),
///     messages: vec![ChatMessage::user("prompt1")],
///     n: 1,
/// };
/// let response = transport.complete(&request).await.unwrap();
/// assert_eq!(response.first_text(), Some("response1"));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockTransport {
    default_reply: Result<ChatResponse, LlmError>,
    scripted: Arc<Mutex<HashMap<String, Result<ChatResponse, LlmError>>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockTransport {
    /// Transport that answers every request with `reply`
    pub fn new(reply: impl Into<String>) -> Self {
        Self::with_default(Ok(ChatResponse::from_text(reply)))
    }

    /// Transport that fails every request with `error`
    pub fn failing(error: LlmError) -> Self {
        Self::with_default(Err(error))
    }

    fn with_default(default_reply: Result<ChatResponse, LlmError>) -> Self {
        Self {
            default_reply,
            scripted: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply with `response` when the user message equals `prompt`
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.scripted).insert(prompt.into(), Ok(ChatResponse::from_text(response)));
    }

    /// Reply with a full response body when the user message equals `prompt`
    pub fn add_raw_response(&mut self, prompt: impl Into<String>, response: ChatResponse) {
        lock(&self.scripted).insert(prompt.into(), Ok(response));
    }

    /// Fail with `error` when the user message equals `prompt`
    pub fn add_error(&mut self, prompt: impl Into<String>, error: LlmError) {
        lock(&self.scripted).insert(prompt.into(), Err(error));
    }

    /// Number of requests received
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Most recent request received
    pub fn last_request(&self) -> Option<ChatRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Forget recorded requests
    pub fn reset(&self) {
        lock(&self.requests).clear();
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl ChatTransport for MockTransport {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        lock(&self.requests).push(request.clone());

        let scripted = lock(&self.scripted);
        let reply = request
            .user_content()
            .and_then(|prompt| scripted.get(prompt))
            .unwrap_or(&self.default_reply);
        reply.clone()
    }
}

// A panicking test thread must not hide the log from later assertions
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
