//! Configuration for the completion client

use crate::credentials::DEFAULT_KEY_FILE;
use crate::openai::DEFAULT_ENDPOINT;
use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-1106";

/// Configuration for a [`CompletionClient`](crate::CompletionClient)
///
/// # Examples
///
/// ```
/// use paperlens_llm::ClientConfig;
///
/// let config = ClientConfig::from_toml("model = \"gpt-4\"").unwrap();
/// assert_eq!(config.model, "gpt-4");
/// assert_eq!(config.max_attempts, 1);
/// assert!(config.timeout().is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Model identifier; also selects the tokenizer
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    pub endpoint: String,

    /// Credential file read when no key is passed explicitly
    pub key_file: PathBuf,

    /// Request timeout in seconds; unset means wait indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Total attempts per query, including the first
    pub max_attempts: u32,
}

impl Default for ClientConfig {
    /// Single attempt, no timeout, `key.txt` in the working directory
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            key_file: PathBuf::from(DEFAULT_KEY_FILE),
            timeout_secs: None,
            max_attempts: 1,
        }
    }
}

impl ClientConfig {
    /// Configuration for a specific model, defaults elsewhere
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Request timeout as a Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.model.trim().is_empty() {
            return Err(LlmError::Config("model must not be empty".to_string()));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(LlmError::Config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.max_attempts == 0 {
            return Err(LlmError::Config("max_attempts must be at least 1".to_string()));
        }
        if self.timeout_secs == Some(0) {
            return Err(LlmError::Config("timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, LlmError> {
        toml::from_str(toml_str)
            .map_err(|e| LlmError::Config(format!("Failed to parse TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.key_file, PathBuf::from("key.txt"));
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut config = ClientConfig::default();
        config.endpoint = "api.openai.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_attempts_and_timeout() {
        let mut config = ClientConfig::default();
        config.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_model() {
        let config = ClientConfig::for_model("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_timeout() {
        let config = ClientConfig::from_toml("model = \"gpt-4\"\ntimeout_secs = 60").unwrap();
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.timeout(), Some(Duration::from_secs(60)));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ClientConfig::from_toml("max_attempts = 3\nkey_file = \"secrets/openai.txt\"").unwrap();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.key_file, PathBuf::from("secrets/openai.txt"));
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            ClientConfig::from_toml("max_attempts = \"many\""),
            Err(LlmError::Config(_))
        ));
    }
}
