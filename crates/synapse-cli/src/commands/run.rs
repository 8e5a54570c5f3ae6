//! Pipeline run command.
//!
//! Orchestrates the selected phases: directory setup first (fatal on
//! failure), then map over each input directory with its document kind,
//! then the reduce aggregation. Per-document and per-reduce failures are
//! reported through counts, never through the process exit code.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;
use std::path::PathBuf;
use std::sync::Arc;
use synapse_domain::{DocumentKind, ExtractionKind, MapStats};
use synapse_extractor::ExtractorRegistry;
use synapse_llm::OllamaProvider;
use synapse_pipeline::{
    require_non_empty, run_map_phase, run_reduce_phase, scan_by_extension, MapOptions,
    ReduceOptions, ReduceOutcome, ReduceTarget,
};
use tracing::{debug, info};

/// Extension of input transcript files
const TRANSCRIPT_EXTENSION: &str = "txt";

/// Run the selected pipeline phase(s).
pub async fn execute_run(args: RunArgs, config: &Config) -> Result<()> {
    let kind = config.extraction_kind()?;
    info!("Extraction type: {}", kind);
    info!("Concurrency limit: {}", config.processing.concurrency);
    info!("Map output directory: {}", config.map_phase.output_map_dir.display());

    setup_directories(config, kind).await?;

    if args.phase.includes_map() {
        let stats = run_map(config, kind).await?;
        info!("Map phase complete");
        info!("Successfully processed: {}", stats.processed);
        info!("Failed to process: {}", stats.failed);
        println!(
            "Map phase: processed {}, failed {}",
            stats.processed, stats.failed
        );
    }

    if args.phase.includes_reduce() {
        let outcome = run_reduce(config, kind).await?;
        info!(
            "Reduce phase success: {}, source artifacts: {}",
            outcome.success, outcome.sources
        );
        println!(
            "Reduce phase: success {}, source artifacts {}",
            outcome.success, outcome.sources
        );
    }

    Ok(())
}

/// Create the output directories before any work starts.
///
/// Failure here is fatal: workers must never race directory creation.
async fn setup_directories(config: &Config, kind: ExtractionKind) -> Result<()> {
    tokio::fs::create_dir_all(&config.map_phase.output_map_dir).await?;
    let reduce_dir = reduce_output_dir(config, kind);
    tokio::fs::create_dir_all(&reduce_dir).await?;
    info!(
        "Ensured output directories exist: {}, {}",
        config.map_phase.output_map_dir.display(),
        reduce_dir.display()
    );
    Ok(())
}

fn reduce_output_dir(config: &Config, kind: ExtractionKind) -> PathBuf {
    match kind {
        ExtractionKind::Newsletter => config.reduce_phase.output_dir.clone(),
        ExtractionKind::PersonProfiles => config.reduce_phase.output_profiles_dir.clone(),
    }
}

/// Run the map phase over every configured input directory.
async fn run_map(config: &Config, kind: ExtractionKind) -> Result<MapStats> {
    info!("--- Starting Map Phase ---");
    info!("Using map model: {}", config.map_phase.llm_model);

    let provider = Arc::new(OllamaProvider::new(
        &config.provider.endpoint,
        &config.map_phase.llm_model,
    )?);
    let registry = ExtractorRegistry::new(provider, kind);

    let directories = [
        (&config.map_phase.meetings_dir, DocumentKind::Meeting),
        (&config.map_phase.telegram_dir, DocumentKind::Telegram),
    ];

    let options = MapOptions {
        concurrency: config.processing.concurrency,
        output_dir: config.map_phase.output_map_dir.clone(),
    };

    let mut totals = MapStats::default();
    for (dir, doc_kind) in directories {
        // A missing directory means the kind is not in use; a configured
        // directory that exists but holds no transcripts is a setup error.
        if !dir.exists() {
            debug!("Skipping absent input directory: {}", dir.display());
            continue;
        }

        let files = require_non_empty(scan_by_extension(dir, TRANSCRIPT_EXTENSION)?, dir)?;

        info!("Processing {} {} files", files.len(), doc_kind);
        let extractor = registry.map_extractor(doc_kind);
        let stats = run_map_phase(files, extractor, &options).await?;
        totals.merge(stats);
    }

    info!("--- Map Phase Complete ---");
    Ok(totals)
}

/// Run the reduce phase over the accumulated map artifacts.
async fn run_reduce(config: &Config, kind: ExtractionKind) -> Result<ReduceOutcome> {
    info!("--- Starting Reduce Phase ---");
    info!("Using reduce model: {}", config.reduce_phase.llm_model);

    let provider = Arc::new(OllamaProvider::new(
        &config.provider.endpoint,
        &config.reduce_phase.llm_model,
    )?);
    let registry = ExtractorRegistry::new(provider, kind);

    let target = match kind {
        ExtractionKind::Newsletter => ReduceTarget::Newsletter {
            output_dir: config.reduce_phase.output_dir.clone(),
        },
        ExtractionKind::PersonProfiles => ReduceTarget::Profiles {
            output_dir: config.reduce_phase.output_profiles_dir.clone(),
        },
    };
    let options = ReduceOptions {
        map_dir: config.map_phase.output_map_dir.clone(),
        target,
    };

    let outcome = run_reduce_phase(registry.reducer(), &options).await?;
    info!("--- Reduce Phase Complete ---");
    Ok(outcome)
}
