//! API credential loading

use crate::LlmError;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Credential file read when no key is passed explicitly
pub const DEFAULT_KEY_FILE: &str = "key.txt";

/// An API credential; `Debug` never prints the secret
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a credential string
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Use `explicit` when given and non-empty, otherwise read `key_file`
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] when no explicit key is given and the
    /// file is missing, unreadable or empty.
    pub fn resolve(explicit: Option<String>, key_file: &Path) -> Result<Self, LlmError> {
        if let Some(key) = explicit.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            return Ok(Self(key));
        }
        Self::from_file(key_file)
    }

    /// Read a credential from a plain-text file, trimming whitespace
    pub fn from_file(path: &Path) -> Result<Self, LlmError> {
        debug!(path = %path.display(), "loading API key from file");
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LlmError::Config(format!(
                "API key file not found at {}. Please provide a valid API key.",
                path.display()
            )),
            _ => LlmError::Config(format!(
                "Failed to read API key file {}: {}",
                path.display(),
                e
            )),
        })?;

        let key = contents.trim();
        if key.is_empty() {
            return Err(LlmError::Config(format!(
                "API key file {} is empty",
                path.display()
            )));
        }
        Ok(Self(key.to_string()))
    }

    /// The raw secret, for building request headers
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
