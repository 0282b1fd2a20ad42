//! Bootstrap patching - makes the Closure `base.js` runnable under Node
//!
//! The Closure bootstrap assumes a browser-like global object. Two of its
//! global-binding idioms must be rewritten before it can execute in a plain
//! Node process; the patched copy is written to a run-scoped scratch file
//! that is deleted when the handle drops.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur while patching the bootstrap file
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Bootstrap file does not exist
    #[error("bootstrap file not found: {0}")]
    NotFound(PathBuf),

    /// IO error reading the bootstrap or writing the scratch copy
    #[error("io error patching bootstrap: {0}")]
    Io(#[from] std::io::Error),
}

/// Rewrite the bootstrap for Node and return the scratch file holding the
/// patched copy. The file is removed when the returned handle is dropped,
/// on success and failure paths alike.
pub fn patch_bootstrap(base_path: impl AsRef<Path>) -> Result<NamedTempFile, BootstrapError> {
    let base_path = base_path.as_ref();
    if !base_path.exists() {
        return Err(BootstrapError::NotFound(base_path.to_path_buf()));
    }

    let content = fs::read_to_string(base_path)?;
    let patched = patch_content(&content);

    let mut scratch = NamedTempFile::new()?;
    scratch.write_all(patched.as_bytes())?;
    scratch.flush()?;
    Ok(scratch)
}

/// Apply the two Node rewrites to bootstrap content
#[must_use]
pub fn patch_content(content: &str) -> String {
    content
        .replacen("var goog = goog || {};", "global.goog = global.goog || {};", 1)
        .replacen("goog.global = this;", "goog.global = global;", 1)
}
