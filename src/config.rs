//! Task configuration
//!
//! The recognized options form a statically-typed record with the same
//! defaults the task has always shipped; anything else under `[extra]` is
//! forwarded verbatim to the test-execution driver. Config is read from
//! `.nstest.toml` in the project root, or from an explicit `--config` path.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Project configuration filename
pub const CONFIG_FILE: &str = ".nstest.toml";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file does not exist
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// IO error reading the config file
    #[error("io error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Task configuration with the recognized options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    /// Path to the base-runtime bootstrap file
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Path to the dependency manifest
    #[serde(default = "default_deps_path")]
    pub deps_path: String,

    /// Relative-path prefix prepended to every manifest path
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Mock/helper file always preloaded before the closure files
    #[serde(default)]
    pub mock_file: Option<String>,

    /// Mocha UI style
    #[serde(default = "default_ui")]
    pub ui: String,

    /// Mocha reporter name
    #[serde(default = "default_reporter")]
    pub reporter: String,

    /// Global identifiers tests are allowed to declare
    #[serde(default)]
    pub globals: Vec<String>,

    /// Per-test timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Stop after the first failing test
    #[serde(default)]
    pub bail: bool,

    /// Slow-test threshold in milliseconds
    #[serde(default)]
    pub slow_ms: Option<u64>,

    /// Filter tests by name (string or regexp source)
    #[serde(default)]
    pub grep: Option<String>,

    /// Unrecognized options, forwarded verbatim to the test driver
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_base_path() -> String {
    "bower_components/closure-library/closure/goog/base.js".to_string()
}

fn default_deps_path() -> String {
    "client/app/js/deps.js".to_string()
}

fn default_prefix() -> String {
    "../../../../../".to_string()
}

fn default_ui() -> String {
    "tdd".to_string()
}

fn default_reporter() -> String {
    "dot".to_string()
}

const fn default_timeout_ms() -> u64 {
    100
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            deps_path: default_deps_path(),
            prefix: default_prefix(),
            mock_file: None,
            ui: default_ui(),
            reporter: default_reporter(),
            globals: Vec::new(),
            timeout_ms: default_timeout_ms(),
            bail: false,
            slow_ms: None,
            grep: None,
            extra: BTreeMap::new(),
        }
    }
}

impl TaskConfig {
    /// Load config from an explicit path
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `.nstest.toml` from a directory if present, defaults otherwise.
    /// A present but malformed file is an error, not a silent default.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
