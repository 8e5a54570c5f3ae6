//! Error types for the pipeline
//!
//! Only setup-class failures surface through this enum. Per-document errors
//! are tallied into [`MapStats`](synapse_domain::MapStats) and reduce-call
//! errors fold into [`ReduceOutcome`](crate::ReduceOutcome).

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a phase before or outside per-document work
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Directory listing/creation or artifact-set read failed
    #[error("Setup error: {0}")]
    Setup(#[from] std::io::Error),

    /// A required input directory contained no matching documents
    #[error("No input documents found in {}", .0.display())]
    EmptyInputDirectory(PathBuf),

    /// The work queue rejected an item before workers started
    #[error("Work queue error: {0}")]
    WorkQueue(String),

    /// A worker task panicked (per-document errors never reach here)
    #[error("Worker task failed: {0}")]
    Worker(String),
}
