//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use paperlens_article::ArticleSummary;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format every view of an article.
    pub fn format_summary(&self, summary: &ArticleSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Text => Ok([
                self.labelled("Title", &summary.title),
                self.labelled("Abstract", &summary.abstract_text),
                self.labelled("Figures/Tables Captions", &summary.captions),
                self.labelled("Main Content", &summary.main_content),
            ]
            .join("\n\n")),
        }
    }

    /// Format a single extracted view under `label`.
    pub fn format_part(&self, label: &str, text: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "part": label,
                "text": text,
            }))?),
            OutputFormat::Text => Ok(text.to_string()),
        }
    }

    /// Format a model reply.
    pub fn format_reply(&self, model: &str, prompt_tokens: usize, reply: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "model": model,
                "prompt_tokens": prompt_tokens,
                "reply": reply,
            }))?),
            OutputFormat::Text => Ok(reply.to_string()),
        }
    }

    /// Format a token count.
    pub fn format_token_count(&self, model: &str, tokens: usize) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "model": model,
                "tokens": tokens,
            }))?),
            OutputFormat::Text => Ok(format!("{} {}", self.label(model), tokens)),
        }
    }

    fn labelled(&self, label: &str, text: &str) -> String {
        format!("{}\n{}", self.label(&format!("{}:", label)), text)
    }

    fn label(&self, label: &str) -> String {
        if self.color_enabled {
            label.bold().cyan().to_string()
        } else {
            label.to_string()
        }
    }
}
