//! Input-file enumeration

use crate::PipelineError;
use std::path::{Path, PathBuf};

/// List files in `dir` (non-recursive) whose extension equals `extension`
///
/// An empty result is a valid outcome, not an error; use
/// [`require_non_empty`] where the caller enforces a non-empty
/// precondition. No ordering is guaranteed.
pub fn scan_by_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, PipelineError> {
    scan(dir, |path| {
        path.extension().and_then(|e| e.to_str()) == Some(extension)
    })
}

/// List files in `dir` (non-recursive) whose name ends with `suffix`
///
/// Used for map artifacts, whose `.map.md` marker spans two extension
/// components.
pub fn scan_by_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, PipelineError> {
    scan(dir, |path| {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix))
    })
}

/// Fail with `EmptyInputDirectory` when a scan of `dir` came back empty
pub fn require_non_empty(files: Vec<PathBuf>, dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    if files.is_empty() {
        return Err(PipelineError::EmptyInputDirectory(dir.to_path_buf()));
    }
    Ok(files)
}

fn scan<F>(dir: &Path, keep: F) -> Result<Vec<PathBuf>, PipelineError>
where
    F: Fn(&Path) -> bool,
{
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && keep(&path) {
            files.push(path);
        }
    }
    Ok(files)
}
