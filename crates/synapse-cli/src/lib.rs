//! Synapse CLI library.
//!
//! This library provides the core functionality for the Synapse
//! command-line interface: configuration management, phase orchestration,
//! and export ingestion.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Command, PhaseArg};
pub use config::Config;
pub use error::{CliError, Result};
