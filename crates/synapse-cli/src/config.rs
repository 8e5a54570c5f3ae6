//! Configuration management for the CLI.
//!
//! Settings are read once at startup from a TOML file and handed down by
//! reference; no component reads ambient global state.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use synapse_domain::ExtractionKind;

/// Default configuration file looked up next to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "synapse.toml";

/// Pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Map phase settings
    #[serde(default)]
    pub map_phase: MapPhaseConfig,

    /// Reduce phase settings
    #[serde(default)]
    pub reduce_phase: ReducePhaseConfig,

    /// Shared processing settings
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// LLM provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Map phase settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapPhaseConfig {
    /// Type of extraction to perform
    #[serde(default = "default_extraction_type")]
    pub extraction_type: String,

    /// Directory containing meeting transcripts
    #[serde(default = "default_meetings_dir")]
    pub meetings_dir: PathBuf,

    /// Directory containing Telegram transcript conversions
    #[serde(default = "default_telegram_dir")]
    pub telegram_dir: PathBuf,

    /// Directory to save the map phase outputs
    #[serde(default = "default_output_map_dir")]
    pub output_map_dir: PathBuf,

    /// LLM model used for map calls
    #[serde(default = "default_model")]
    pub llm_model: String,
}

/// Reduce phase settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReducePhaseConfig {
    /// Directory to save the aggregate newsletter
    #[serde(default = "default_newsletter_dir")]
    pub output_dir: PathBuf,

    /// Directory to save individual profile files
    #[serde(default = "default_profiles_dir")]
    pub output_profiles_dir: PathBuf,

    /// LLM model used for the reduce call
    #[serde(default = "default_model")]
    pub llm_model: String,
}

/// Shared processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Maximum number of concurrent extraction calls
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

/// LLM provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_extraction_type() -> String {
    "newsletter".to_string()
}

fn default_meetings_dir() -> PathBuf {
    PathBuf::from("./data/meetings")
}

fn default_telegram_dir() -> PathBuf {
    PathBuf::from("./data/telegram")
}

fn default_output_map_dir() -> PathBuf {
    PathBuf::from("./map_outputs")
}

fn default_newsletter_dir() -> PathBuf {
    PathBuf::from("./newsletter")
}

fn default_profiles_dir() -> PathBuf {
    PathBuf::from("./profiles")
}

fn default_model() -> String {
    "llama2".to_string()
}

fn default_concurrency() -> usize {
    10
}

fn default_endpoint() -> String {
    synapse_llm::ollama::DEFAULT_ENDPOINT.to_string()
}

impl Default for MapPhaseConfig {
    fn default() -> Self {
        Self {
            extraction_type: default_extraction_type(),
            meetings_dir: default_meetings_dir(),
            telegram_dir: default_telegram_dir(),
            output_map_dir: default_output_map_dir(),
            llm_model: default_model(),
        }
    }
}

impl Default for ReducePhaseConfig {
    fn default() -> Self {
        Self {
            output_dir: default_newsletter_dir(),
            output_profiles_dir: default_profiles_dir(),
            llm_model: default_model(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map_phase: MapPhaseConfig::default(),
            reduce_phase: ReducePhaseConfig::default(),
            processing: ProcessingConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicitly given path must exist; without one, a missing
    /// `synapse.toml` falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                Ok(toml::from_str(&contents)?)
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    let contents = std::fs::read_to_string(default_path)?;
                    Ok(toml::from_str(&contents)?)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate settings that serde cannot check.
    pub fn validate(&self) -> Result<()> {
        if self.processing.concurrency == 0 {
            return Err(CliError::Config(
                "processing.concurrency must be at least 1".to_string(),
            ));
        }
        self.extraction_kind()?;
        Ok(())
    }

    /// The run's extraction kind, rejected at startup when unknown.
    pub fn extraction_kind(&self) -> Result<ExtractionKind> {
        self.map_phase
            .extraction_type
            .parse()
            .map_err(CliError::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extraction_kind().unwrap(), ExtractionKind::Newsletter);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synapse.toml");
        std::fs::write(
            &path,
            r#"
[map_phase]
extraction_type = "person_profiles"
meetings_dir = "./transcripts"

[processing]
concurrency = 5
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(
            config.extraction_kind().unwrap(),
            ExtractionKind::PersonProfiles
        );
        assert_eq!(config.map_phase.meetings_dir, PathBuf::from("./transcripts"));
        assert_eq!(config.processing.concurrency, 5);
        // Unspecified sections keep their defaults
        assert_eq!(config.reduce_phase.output_profiles_dir, PathBuf::from("./profiles"));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        assert!(Config::load(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = Config::default();
        config.processing.concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_extraction_type_rejected() {
        let mut config = Config::default();
        config.map_phase.extraction_type = "digest".to_string();
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }
}
