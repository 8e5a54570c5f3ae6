//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Synapse - analyze meeting transcripts and chat exports with an LLM.
#[derive(Debug, Parser)]
#[command(name = "synapse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the analysis pipeline
    Run(RunArgs),

    /// Convert a Telegram JSON export into a transcript
    IngestTelegram(IngestTelegramArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Which phase to run
    #[arg(long, value_enum, default_value_t = PhaseArg::Both)]
    pub phase: PhaseArg,
}

/// Pipeline phase selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PhaseArg {
    /// Per-document extraction only
    Map,
    /// Aggregation of existing map outputs only
    Reduce,
    /// Map, then reduce
    Both,
}

impl PhaseArg {
    /// Whether this selection includes the map phase
    pub fn includes_map(&self) -> bool {
        matches!(self, PhaseArg::Map | PhaseArg::Both)
    }

    /// Whether this selection includes the reduce phase
    pub fn includes_reduce(&self) -> bool {
        matches!(self, PhaseArg::Reduce | PhaseArg::Both)
    }
}

/// Arguments for the ingest-telegram command.
#[derive(Debug, Parser)]
pub struct IngestTelegramArgs {
    /// Telegram JSON export file
    #[arg(short, long)]
    pub export: PathBuf,

    /// CSV file mapping topic ids to channel names
    #[arg(short, long)]
    pub topics: PathBuf,

    /// Output transcript path
    #[arg(short, long)]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults_to_both_phases() {
        let cli = Cli::parse_from(["synapse", "run"]);
        match cli.command {
            Command::Run(args) => assert_eq!(args.phase, PhaseArg::Both),
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_phase_selection() {
        let cli = Cli::parse_from(["synapse", "run", "--phase", "map"]);
        match cli.command {
            Command::Run(args) => {
                assert!(args.phase.includes_map());
                assert!(!args.phase.includes_reduce());
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_ingest_telegram_args() {
        let cli = Cli::parse_from([
            "synapse",
            "ingest-telegram",
            "--export",
            "export.json",
            "--topics",
            "topics.csv",
            "--output",
            "out.md",
        ]);
        match cli.command {
            Command::IngestTelegram(args) => {
                assert_eq!(args.export, PathBuf::from("export.json"));
                assert_eq!(args.topics, PathBuf::from("topics.csv"));
                assert_eq!(args.output, PathBuf::from("out.md"));
            }
            _ => panic!("Expected IngestTelegram command"),
        }
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::parse_from(["synapse", "run", "--config", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }
}
