//! Tokens command implementation.

use crate::cli::TokensArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use paperlens_article::Article;
use paperlens_llm::Tokenizer;

/// Execute the tokens command.
pub fn execute_tokens(args: TokensArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let model = args.model.unwrap_or_else(|| config.client.model.clone());
    let tokenizer = Tokenizer::for_model(&model)?;
    let article = Article::from_path(&args.file)?;

    let count = tokenizer.count(&article.paper_prompt());
    println!("{}", formatter.format_token_count(&model, count)?);
    Ok(())
}
