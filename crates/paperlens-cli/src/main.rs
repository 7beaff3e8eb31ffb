//! Paperlens CLI - Extract scientific article text and query a language model.

use clap::Parser;
use paperlens_cli::commands;
use paperlens_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing (log to stderr so stdout stays clean for output)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> paperlens_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config from --config, the default path, or built-in defaults
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &formatter)?,
        Command::Ask(args) => commands::execute_ask(args, &config, &formatter).await?,
        Command::Tokens(args) => commands::execute_tokens(args, &config, &formatter)?,
    }

    Ok(())
}
