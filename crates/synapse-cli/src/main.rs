//! Synapse - map/reduce transcript analysis pipeline.

use clap::Parser;
use synapse_cli::{commands, Cli, Command, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> synapse_cli::Result<()> {
    // Log to stderr so piped output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Command::Run(args) => commands::execute_run(args, &config).await?,
        Command::IngestTelegram(args) => commands::execute_ingest_telegram(args)?,
    }

    Ok(())
}
