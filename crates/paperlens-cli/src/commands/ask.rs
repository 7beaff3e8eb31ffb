//! Ask command implementation.

use crate::cli::AskArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use paperlens_article::Article;
use paperlens_llm::{ChatTransport, CompletionClient};
use tracing::info;

/// Execute the ask command.
pub async fn execute_ask(args: AskArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let max_tokens = args.max_tokens.unwrap_or(config.settings.max_prompt_tokens);
    if max_tokens == 0 {
        return Err(CliError::InvalidInput(
            "max-tokens must be greater than 0".to_string(),
        ));
    }

    let mut client_config = config.client.clone();
    if let Some(model) = args.model {
        client_config.model = model;
    }
    if let Some(key_file) = args.key_file {
        client_config.key_file = key_file;
    }
    let client = CompletionClient::new(&client_config, args.api_key)?;

    let article = Article::from_path(&args.file)?;
    let instruction = args
        .instruction
        .unwrap_or_else(|| config.settings.instruction.clone());

    let (prompt_tokens, reply) =
        ask_article(&client, &article, &instruction, max_tokens, args.sentinel).await?;
    println!("{}", formatter.format_reply(client.model(), prompt_tokens, &reply)?);
    Ok(())
}

/// Send an article to the model and return the prompt size and the reply.
///
/// With `sentinel` set, a failed query yields the fixed error reply instead
/// of an error.
pub async fn ask_article<T: ChatTransport>(
    client: &CompletionClient<T>,
    article: &Article,
    instruction: &str,
    max_tokens: usize,
    sentinel: bool,
) -> Result<(usize, String)> {
    let prompt = build_prompt(client, instruction, &article.paper_prompt(), max_tokens);
    let prompt_tokens = client.count_tokens(&prompt);
    info!(title = %article.title(), prompt_tokens, "sending article");

    let reply = if sentinel {
        client.send_query_or_sentinel(&prompt).await
    } else {
        client.send_query(&prompt).await?
    };
    Ok((prompt_tokens, reply))
}

/// Instruction, then the article fenced and cut to `max_tokens`.
pub fn build_prompt<T: ChatTransport>(
    client: &CompletionClient<T>,
    instruction: &str,
    paper: &str,
    max_tokens: usize,
) -> String {
    format!("{}\n\n```\n{}", instruction, client.truncate(paper, max_tokens))
}
