//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paperlens CLI - Extract article text and ask a language model about it.
#[derive(Debug, Parser)]
#[command(name = "paperlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Plain text (default)
    Text,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print text extracted from an article
    Extract(ExtractArgs),

    /// Send an article to the language model
    Ask(AskArgs),

    /// Count model tokens in the assembled article prompt
    Tokens(TokensArgs),
}

/// Which part of the article to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Part {
    /// Title, abstract, captions and main content
    All,
    /// Article title
    Title,
    /// Abstract
    Abstract,
    /// A single section, chosen with --section
    Section,
    /// Figure and table captions
    Captions,
    /// All sections except Figures
    Main,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Article XML file
    pub file: PathBuf,

    /// Part of the article to print
    #[arg(short, long, value_enum, default_value = "all")]
    pub part: Part,

    /// Section title for --part section (case-insensitive)
    #[arg(short, long, default_value = "Introduction")]
    pub section: String,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Article XML file
    pub file: PathBuf,

    /// Instruction placed before the article text
    #[arg(short, long)]
    pub instruction: Option<String>,

    /// Maximum article tokens to send
    #[arg(long)]
    pub max_tokens: Option<usize>,

    /// Model identifier
    #[arg(short, long)]
    pub model: Option<String>,

    /// API key (otherwise read from the key file)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// File holding the API key
    #[arg(long)]
    pub key_file: Option<PathBuf>,

    /// Print the fixed error reply instead of failing when the query fails
    #[arg(long)]
    pub sentinel: bool,
}

/// Arguments for the tokens command.
#[derive(Debug, Parser)]
pub struct TokensArgs {
    /// Article XML file
    pub file: PathBuf,

    /// Model identifier
    #[arg(short, long)]
    pub model: Option<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
