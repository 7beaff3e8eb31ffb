//! Model-matched token counting and truncation

use crate::LlmError;
use std::fmt;
use std::sync::Arc;
use tiktoken_rs::CoreBPE;

/// Closing marker appended by [`Tokenizer::truncate`]
pub const CODE_FENCE: &str = "```";

/// BPE tokenizer selected by model identifier
#[derive(Clone)]
pub struct Tokenizer {
    model: String,
    bpe: Arc<CoreBPE>,
}

impl Tokenizer {
    /// Tokenizer for the given model
    ///
    /// Accepts exact names and versioned variants (`gpt-3.5-turbo-1106`).
    pub fn for_model(model: &str) -> Result<Self, LlmError> {
        let bpe = tiktoken_rs::get_bpe_from_model(model)
            .map_err(|e| LlmError::Tokenizer(format!("no tokenizer for model '{}': {}", model, e)))?;
        Ok(Self {
            model: model.to_string(),
            bpe: Arc::new(bpe),
        })
    }

    /// Model this tokenizer was selected for
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Number of tokens in `text`
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    /// Cut `text` to at most `max_tokens` tokens and close it with a code fence
    ///
    /// Trailing tokens that would split a UTF-8 sequence are dropped. A
    /// newline plus "```" is appended unless the kept text already ends with
    /// "```", whether or not a fence was ever opened.
    pub fn truncate(&self, text: &str, max_tokens: usize) -> String {
        let tokens = self.bpe.encode_ordinary(text);
        let mut end = tokens.len().min(max_tokens);

        let mut truncated = loop {
            match self.bpe.decode(tokens[..end].to_vec()) {
                Ok(decoded) => break decoded,
                Err(_) if end > 0 => end -= 1,
                Err(_) => break String::new(),
            }
        };

        if !truncated.ends_with(CODE_FENCE) {
            truncated.push('\n');
            truncated.push_str(CODE_FENCE);
        }
        truncated
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer").field("model", &self.model).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> Tokenizer {
        Tokenizer::for_model("gpt-3.5-turbo-1106").unwrap()
    }

    #[test]
    fn test_count_tokens() {
        let tok = tokenizer();
        assert_eq!(tok.count(""), 0);
        assert_eq!(tok.count("hello world"), 2);
    }

    #[test]
    fn test_unknown_model() {
        let result = Tokenizer::for_model("definitely-not-a-model");
        assert!(matches!(result, Err(LlmError::Tokenizer(_))));
    }

    #[test]
    fn test_truncate_limits_tokens() {
        let tok = tokenizer();
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);
        let truncated = tok.truncate(&text, 5);

        let body = truncated.strip_suffix("\n```").unwrap();
        assert!(tok.count(body) <= 5);
        assert!(text.starts_with(body));
    }

    #[test]
    fn test_truncate_short_text_keeps_content() {
        let tok = tokenizer();
        assert_eq!(tok.truncate("short text", 100), "short text\n```");
    }

    #[test]
    fn test_truncate_keeps_existing_fence() {
        let tok = tokenizer();
        let text = "```rust\nfn main() {}\n```";
        assert_eq!(tok.truncate(text, 1000), text);
    }

    #[test]
    fn test_truncate_zero_tokens() {
        let tok = tokenizer();
        assert_eq!(tok.truncate("anything", 0), "\n```");
    }

    #[test]
    fn test_truncate_never_splits_characters() {
        let tok = tokenizer();
        let text = "🦀🦀🦀🦀 crabs";
        let mut previous = 0;
        for max in 0..12 {
            let truncated = tok.truncate(text, max);
            let body = truncated.strip_suffix("\n```").unwrap();
            assert!(text.starts_with(body));
            assert!(body.len() >= previous);
            previous = body.len();
        }
        assert_eq!(tok.truncate(text, 100), format!("{}\n```", text));
    }
}
