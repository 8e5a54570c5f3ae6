//! Deterministic artifact ordering
//!
//! Map outputs are written by racing workers, so their on-disk order is
//! meaningless. This module restores a total order before aggregation:
//! filenames carrying a parsable timestamp prefix first (chronological),
//! everything else after (alphabetical). The two groups never interleave.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Filenames are expected to start with e.g. "2024-01-02 10_00"
const TIMESTAMP_PREFIX_LEN: usize = 16;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H_%M";

/// Order artifacts chronologically where possible, alphabetically otherwise
///
/// The result is a total order, deterministic across runs for the same
/// filename set, and idempotent.
pub fn sort_artifacts(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut timestamped: Vec<(NaiveDateTime, PathBuf)> = Vec::new();
    let mut unparseable: Vec<PathBuf> = Vec::new();

    for path in paths {
        match parse_timestamp_prefix(&path) {
            Some(dt) => timestamped.push((dt, path)),
            None => {
                warn!(
                    "Could not parse timestamp from filename: {}",
                    path.display()
                );
                unparseable.push(path);
            }
        }
    }

    // Filename tiebreak keeps equal timestamps deterministic
    timestamped.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.file_name().cmp(&b.1.file_name()))
    });
    unparseable.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    timestamped
        .into_iter()
        .map(|(_, path)| path)
        .chain(unparseable)
        .collect()
}

fn parse_timestamp_prefix(path: &Path) -> Option<NaiveDateTime> {
    let name = path.file_name()?.to_str()?;
    let prefix = name.get(..TIMESTAMP_PREFIX_LEN)?;
    NaiveDateTime::parse_from_str(prefix, TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|name| PathBuf::from(*name)).collect()
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_chronological_then_alphabetical() {
        let sorted = sort_artifacts(paths(&[
            "2024-01-02 10_00.map.md",
            "notes.map.md",
            "2023-12-31 08_00.map.md",
            "alpha.map.md",
            "2024-01-01 09_00.map.md",
        ]));

        assert_eq!(
            names(&sorted),
            vec![
                "2023-12-31 08_00.map.md",
                "2024-01-01 09_00.map.md",
                "2024-01-02 10_00.map.md",
                "alpha.map.md",
                "notes.map.md",
            ]
        );
    }

    #[test]
    fn test_groups_never_interleave() {
        // "zzz" sorts after any date string lexicographically, but still
        // must come last only within the unparseable group; a very late
        // timestamp still precedes it.
        let sorted = sort_artifacts(paths(&[
            "zzz.map.md",
            "2099-01-01 00_00.map.md",
            "aaa.map.md",
        ]));
        assert_eq!(
            names(&sorted),
            vec!["2099-01-01 00_00.map.md", "aaa.map.md", "zzz.map.md"]
        );
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let once = sort_artifacts(paths(&[
            "2024-01-02 10_00.map.md",
            "notes.map.md",
            "2024-01-01 09_00.map.md",
        ]));
        let twice = sort_artifacts(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_deterministic_across_input_orders() {
        let a = sort_artifacts(paths(&["b.map.md", "a.map.md", "2024-05-05 12_30.map.md"]));
        let b = sort_artifacts(paths(&["2024-05-05 12_30.map.md", "a.map.md", "b.map.md"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_malformed_timestamp_falls_back_to_alphabetical() {
        // Right length, wrong content
        let sorted = sort_artifacts(paths(&[
            "2024-13-45 99_99.map.md",
            "2024-01-01 09_00.map.md",
        ]));
        assert_eq!(
            names(&sorted),
            vec!["2024-01-01 09_00.map.md", "2024-13-45 99_99.map.md"]
        );
    }

    #[test]
    fn test_short_names_do_not_panic() {
        let sorted = sort_artifacts(paths(&["a.md", "2024-01-01 09_00.map.md"]));
        assert_eq!(names(&sorted), vec!["2024-01-01 09_00.map.md", "a.md"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(sort_artifacts(vec![]).is_empty());
    }
}
