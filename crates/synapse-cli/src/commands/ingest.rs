//! Telegram export ingestion command.

use crate::cli::IngestTelegramArgs;
use crate::error::Result;
use synapse_ingest::parse_telegram_export;

/// Convert a Telegram JSON export into a transcript markdown file.
pub fn execute_ingest_telegram(args: IngestTelegramArgs) -> Result<()> {
    parse_telegram_export(&args.export, &args.topics, &args.output)?;
    println!("Transcript written to {}", args.output.display());
    Ok(())
}
