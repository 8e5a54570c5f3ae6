//! Map-phase worker pool
//!
//! Processes an arbitrary number of documents with a fixed upper bound on
//! concurrently in-flight extraction calls. Work is distributed through one
//! shared queue that is closed once every path is enqueued; workers pull
//! the next item only after finishing the previous one, so a slow document
//! never starves faster ones. Completion is a join on every worker after
//! the queue drains, so no task is left behind.

use crate::{PipelineError, MAP_ARTIFACT_SUFFIX};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use synapse_domain::{Extract, MapStats, NO_FINDINGS_SENTINEL};
use tokio::sync::{mpsc, Mutex};
use tracing::{error, info, warn};

/// Map-phase settings for one run
#[derive(Debug, Clone)]
pub struct MapOptions {
    /// Upper bound on concurrently in-flight extraction calls (>= 1)
    pub concurrency: usize,

    /// Directory receiving `<stem>.map.md` artifacts
    pub output_dir: PathBuf,
}

/// Terminal disposition of one dequeued document
enum DocOutcome {
    /// Extraction returned; artifact persisted unless empty/sentinel
    Processed,

    /// Body empty after trimming; neither counter moves
    Skipped,
}

/// Run the map phase over `files` with bounded concurrency
///
/// Per-document read/extraction/write failures are tallied as `failed` and
/// never abort the pool. Creating the output directory is a setup error
/// and aborts the run before any work starts.
pub async fn run_map_phase(
    files: Vec<PathBuf>,
    extractor: Arc<dyn Extract>,
    options: &MapOptions,
) -> Result<MapStats, PipelineError> {
    tokio::fs::create_dir_all(&options.output_dir).await?;
    info!(
        "Ensured output directory exists: {}",
        options.output_dir.display()
    );

    let total = files.len();
    info!("Processing {} files", total);
    if total == 0 {
        return Ok(MapStats::default());
    }

    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.set_message("Mapping files...");

    // Queue sized to hold every item so enqueueing never blocks; dropping
    // the sender closes the channel and lets workers drain to completion.
    let (work_tx, work_rx) = mpsc::channel::<PathBuf>(total);
    for path in files {
        work_tx
            .send(path)
            .await
            .map_err(|e| PipelineError::WorkQueue(e.to_string()))?;
    }
    drop(work_tx);

    let work_rx = Arc::new(Mutex::new(work_rx));
    let processed = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));

    let worker_count = options.concurrency.clamp(1, total);
    let mut workers = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        let work_rx = Arc::clone(&work_rx);
        let extractor = Arc::clone(&extractor);
        let processed = Arc::clone(&processed);
        let failed = Arc::clone(&failed);
        let output_dir = options.output_dir.clone();
        let progress = progress.clone();

        workers.push(tokio::spawn(async move {
            loop {
                let next = { work_rx.lock().await.recv().await };
                let Some(path) = next else { break };

                match process_document(&path, extractor.as_ref(), &output_dir).await {
                    Ok(DocOutcome::Processed) => {
                        processed.fetch_add(1, Ordering::Relaxed);
                    }
                    Ok(DocOutcome::Skipped) => {}
                    Err(reason) => {
                        failed.fetch_add(1, Ordering::Relaxed);
                        error!("Error processing transcript {}: {}", path.display(), reason);
                    }
                }
                // Exactly once per dequeued document, whatever the outcome
                progress.inc(1);
            }
        }));
    }

    for worker in workers {
        worker
            .await
            .map_err(|e| PipelineError::Worker(e.to_string()))?;
    }
    progress.finish_and_clear();

    Ok(MapStats {
        processed: processed.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
    })
}

async fn process_document(
    path: &Path,
    extractor: &dyn Extract,
    output_dir: &Path,
) -> Result<DocOutcome, String> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| e.to_string())?;
    let text = raw.trim();

    if text.is_empty() {
        warn!("Skipping empty file: {}", path.display());
        return Ok(DocOutcome::Skipped);
    }

    let source_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output = extractor
        .extract(text, &source_name)
        .await
        .map_err(|e| e.to_string())?;

    let body = output.trim();
    if !body.is_empty() && body != NO_FINDINGS_SENTINEL {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let artifact = output_dir.join(format!("{}{}", stem, MAP_ARTIFACT_SUFFIX));
        tokio::fs::write(&artifact, &output)
            .await
            .map_err(|e| e.to_string())?;
        info!("Map output saved: {}", artifact.display());
    } else {
        info!("No extractable content in: {}", path.display());
    }

    Ok(DocOutcome::Processed)
}
