//! Test-file selection - expands CLI patterns into a test-file set
//!
//! A pattern can be a literal file path, a directory (selects every
//! `_test.js` under it), or a glob. A literal with no glob metacharacters
//! passes through even when it does not exist, so the no-op "single missing
//! file" path stays reachable downstream.

use std::path::Path;

use thiserror::Error;
use walkdir::WalkDir;

/// Errors that can occur during selection expansion
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Pattern is not a valid glob
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        /// The offending pattern
        pattern: String,
        /// Underlying glob error
        source: glob::PatternError,
    },

    /// Error reading a matched path
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// Error walking a selected directory
    #[error("walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

/// Expand patterns into an ordered test-file selection
pub fn expand(patterns: &[String]) -> Result<Vec<String>, SelectionError> {
    let mut files = Vec::new();

    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_dir() {
            files.extend(walk_tests(path)?);
        } else if path.is_file() || !has_glob_meta(pattern) {
            files.push(pattern.clone());
        } else {
            files.extend(expand_glob(pattern)?);
        }
    }

    Ok(files)
}

/// Collect every `_test.js` under a directory, sorted for determinism
fn walk_tests(dir: &Path) -> Result<Vec<String>, SelectionError> {
    let mut matches = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).into_iter().filter_entry(|e| {
        // Don't filter the root directory itself
        if e.path() == dir {
            return true;
        }
        !is_hidden(e)
    }) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.ends_with("_test.js") {
            matches.push(entry.path().to_string_lossy().into_owned());
        }
    }

    matches.sort();
    Ok(matches)
}

fn expand_glob(pattern: &str) -> Result<Vec<String>, SelectionError> {
    let paths = glob::glob(pattern).map_err(|source| SelectionError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut matches = Vec::new();
    for path in paths {
        matches.push(path?.to_string_lossy().into_owned());
    }
    matches.sort();
    Ok(matches)
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Check if an entry is hidden (starts with .)
fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}
