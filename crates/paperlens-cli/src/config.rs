//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use paperlens_llm::ClientConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Instruction used by `ask` when none is configured or passed.
pub const DEFAULT_INSTRUCTION: &str = "Review the following scientific paper. \
Summarize its main contributions, then list its most significant weaknesses.";

/// Article token budget used by `ask` when none is configured or passed.
pub const DEFAULT_MAX_PROMPT_TOKENS: usize = 6500;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Completion client settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Instruction placed before the article by `ask`
    #[serde(default = "default_instruction")]
    pub instruction: String,

    /// Maximum article tokens sent by `ask`
    #[serde(default = "default_max_prompt_tokens")]
    pub max_prompt_tokens: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".paperlens").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default path.
    ///
    /// An explicit path must exist. A missing default file, or no home
    /// directory to look in, yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(Some(path), None),
            None => Self::load_from(None, Self::path().ok()),
        }
    }

    fn load_from(path: Option<&Path>, default_path: Option<PathBuf>) -> Result<Self> {
        let config = match (path, default_path) {
            (Some(path), _) => Self::from_file(path)?,
            (None, Some(default_path)) if default_path.exists() => {
                Self::from_file(&default_path)?
            }
            (None, default_path) => {
                debug!(path = ?default_path, "no config file, using defaults");
                Self::default()
            }
        };

        config.client.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Text,
            instruction: DEFAULT_INSTRUCTION.to_string(),
            max_prompt_tokens: DEFAULT_MAX_PROMPT_TOKENS,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}

fn default_instruction() -> String {
    DEFAULT_INSTRUCTION.to_string()
}

fn default_max_prompt_tokens() -> usize {
    DEFAULT_MAX_PROMPT_TOKENS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Text);
        assert_eq!(config.settings.max_prompt_tokens, DEFAULT_MAX_PROMPT_TOKENS);
        assert_eq!(config.client.model, paperlens_llm::DEFAULT_MODEL);
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[client]\nmodel = \"gpt-4\"\ntimeout_secs = 30\n\n[settings]\nformat = \"json\"\nmax_prompt_tokens = 1000\n"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.client.model, "gpt-4");
        assert_eq!(config.client.timeout_secs, Some(30));
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.settings.max_prompt_tokens, 1000);
        assert_eq!(config.settings.instruction, DEFAULT_INSTRUCTION);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = Config::load(Some(Path::new("/nonexistent/paperlens.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_load_rejects_invalid_client() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[client]\nmax_attempts = 0\n").unwrap();
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(CliError::Llm(_))
        ));
    }

    #[test]
    fn test_no_home_directory_uses_defaults() {
        let config = Config::load_from(None, None).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Text);
        assert_eq!(config.client.model, paperlens_llm::DEFAULT_MODEL);
    }

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");
        let config = Config::load_from(None, Some(missing)).unwrap();
        assert!(config.settings.color);
    }
}
