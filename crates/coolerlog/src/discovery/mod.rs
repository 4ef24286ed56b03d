use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};

/// One log file matching the configured filename pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCandidate {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: SystemTime,
}

/// Lists regular files in `dir` whose name matches `pattern`, sorted by path
/// for deterministic output. A missing directory yields an empty list rather
/// than an error; the caller decides how to report that.
pub fn find_log_files(dir: &Path, pattern: &str) -> Result<Vec<LogCandidate>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list log directory: {}", dir.display()))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read directory entry under {}", dir.display()))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !matches_pattern(name, pattern) {
            continue;
        }

        let metadata = entry
            .metadata()
            .with_context(|| format!("failed to stat log file: {}", entry.path().display()))?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().with_context(|| {
            format!(
                "failed to read modification time: {}",
                entry.path().display()
            )
        })?;

        candidates.push(LogCandidate {
            path: entry.path(),
            size_bytes: metadata.len(),
            modified,
        });
    }

    candidates.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(candidates)
}

/// Single-`*` glob: without a star the name must match exactly; with one the
/// name must carry the prefix and suffix around it.
#[must_use]
pub fn matches_pattern(file_name: &str, pattern: &str) -> bool {
    match pattern.split_once('*') {
        None => file_name == pattern,
        Some((prefix, suffix)) => file_name
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
            .is_some(),
    }
}

/// Latest modification time wins; ties break on path so repeated runs pick
/// the same file.
#[must_use]
pub fn select_most_recent(candidates: &[LogCandidate]) -> Option<&LogCandidate> {
    candidates.iter().max_by(|a, b| {
        a.modified
            .cmp(&b.modified)
            .then_with(|| a.path.cmp(&b.path))
    })
}
