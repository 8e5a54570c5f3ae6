//! Reduce-phase aggregation
//!
//! Reads the map artifacts, orders them, concatenates the non-empty bodies
//! and hands the payload to the synthesis seam exactly once. The outcome is
//! always a `ReduceOutcome`: synthesis failures, empty results, and
//! persistence failures all fold into `success = false` with the
//! best-available source count. Only artifact-set listing/read failures
//! (setup class) propagate as errors.

use crate::scanner::scan_by_suffix;
use crate::sort::sort_artifacts;
use crate::{PipelineError, MAP_ARTIFACT_SUFFIX};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use std::sync::Arc;
use synapse_domain::Reduce;
use synapse_extractor::{parse_profile_response, Profile};
use tracing::{error, info, warn};

/// Filename of the aggregate newsletter document
const NEWSLETTER_FILENAME: &str = "newsletter.md";

/// Artifact bodies are joined with a blank line so boundaries stay visible
const ARTIFACT_SEPARATOR: &str = "\n\n";

static NON_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\-.]").expect("filename pattern is valid"));

/// Reduce-phase settings for one run
#[derive(Debug, Clone)]
pub struct ReduceOptions {
    /// Directory holding the `<stem>.map.md` artifacts
    pub map_dir: PathBuf,

    /// Where and how the synthesized result is persisted
    pub target: ReduceTarget,
}

/// Destination shape of the synthesized result
#[derive(Debug, Clone)]
pub enum ReduceTarget {
    /// One aggregate `newsletter.md` inside the directory
    Newsletter {
        /// Directory receiving the newsletter
        output_dir: PathBuf,
    },

    /// One `<sanitized-name>.md` per parsed profile inside the directory
    Profiles {
        /// Directory receiving the profile files
        output_dir: PathBuf,
    },
}

/// Terminal report of one reduce run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReduceOutcome {
    /// Whether a result was synthesized and persisted
    pub success: bool,

    /// Best-available count of contributing source artifacts
    pub sources: usize,
}

impl ReduceOutcome {
    fn failure(sources: usize) -> Self {
        Self {
            success: false,
            sources,
        }
    }
}

/// Convert a person's name to a valid filename
///
/// Every character outside the word/hyphen/dot class becomes an
/// underscore; leading and trailing underscores are trimmed and the result
/// is lowercased. Distinct names can collide after sanitization, in which
/// case the last write wins.
pub fn sanitize_filename(name: &str) -> String {
    NON_FILENAME_CHARS
        .replace_all(name, "_")
        .trim_matches('_')
        .to_lowercase()
}

/// Run the reduce phase over the artifacts in `options.map_dir`
pub async fn run_reduce_phase(
    reducer: Arc<dyn Reduce>,
    options: &ReduceOptions,
) -> Result<ReduceOutcome, PipelineError> {
    info!("Reading map outputs from: {}", options.map_dir.display());

    let artifacts = scan_by_suffix(&options.map_dir, MAP_ARTIFACT_SUFFIX)?;
    if artifacts.is_empty() {
        warn!(
            "No {} files found in {}. Skipping reduce processing.",
            MAP_ARTIFACT_SUFFIX,
            options.map_dir.display()
        );
        return Ok(ReduceOutcome::failure(0));
    }

    let sorted = sort_artifacts(artifacts);

    let mut bodies: Vec<String> = Vec::with_capacity(sorted.len());
    for path in &sorted {
        let content = tokio::fs::read_to_string(path).await?;
        if !content.trim().is_empty() {
            bodies.push(content);
        }
    }

    if bodies.is_empty() {
        warn!(
            "No non-empty content read from {} files in {}. Skipping reduce.",
            MAP_ARTIFACT_SUFFIX,
            options.map_dir.display()
        );
        return Ok(ReduceOutcome::failure(0));
    }

    let payload = bodies.join(ARTIFACT_SEPARATOR);
    info!(
        "Processing {} map outputs. Total size: {} chars.",
        bodies.len(),
        payload.len()
    );

    let result = match reducer.reduce(&payload).await {
        Ok(result) => result,
        Err(e) => {
            error!("Error during reduce processing: {}", e);
            return Ok(ReduceOutcome::failure(bodies.len()));
        }
    };

    if result.trim().is_empty() {
        info!("Reduce call returned empty output.");
        return Ok(ReduceOutcome::failure(bodies.len()));
    }

    match persist_result(&result, &options.target).await {
        Ok(()) => Ok(ReduceOutcome {
            success: true,
            sources: sorted.len(),
        }),
        Err(reason) => {
            error!("Error persisting reduce output: {}", reason);
            Ok(ReduceOutcome::failure(bodies.len()))
        }
    }
}

async fn persist_result(result: &str, target: &ReduceTarget) -> Result<(), String> {
    match target {
        ReduceTarget::Newsletter { output_dir } => {
            tokio::fs::create_dir_all(output_dir)
                .await
                .map_err(|e| e.to_string())?;
            let output_file = output_dir.join(NEWSLETTER_FILENAME);
            tokio::fs::write(&output_file, result)
                .await
                .map_err(|e| e.to_string())?;
            info!("Reduce output saved to {}", output_file.display());
            Ok(())
        }
        ReduceTarget::Profiles { output_dir } => {
            let profiles = parse_profile_response(result).map_err(|e| e.to_string())?;
            if profiles.is_empty() {
                return Err("reduce response contained no usable profiles".to_string());
            }

            tokio::fs::create_dir_all(output_dir)
                .await
                .map_err(|e| e.to_string())?;
            for profile in &profiles {
                let filename = format!("{}.md", sanitize_filename(&profile.metadata.name));
                let path = output_dir.join(filename);
                let document = render_profile_document(profile).map_err(|e| e.to_string())?;
                tokio::fs::write(&path, document)
                    .await
                    .map_err(|e| e.to_string())?;
                info!("Profile saved to {}", path.display());
            }
            info!("Saved {} profiles to {}", profiles.len(), output_dir.display());
            Ok(())
        }
    }
}

/// Render a profile as YAML front matter followed by the markdown body
fn render_profile_document(profile: &Profile) -> Result<String, serde_yaml::Error> {
    let metadata = serde_yaml::to_string(&profile.metadata)?;
    Ok(format!("---\n{}---\n\n{}", metadata, profile.content))
}
