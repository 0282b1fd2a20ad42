//! Test execution - Mocha driver generation and spawning
//!
//! Execution is behind the [`TestExecutor`] trait so the orchestration layer
//! can be tested without a Node toolchain. The real implementation generates
//! a small driver script that purges leaked globals, constructs a Mocha
//! instance with the forwarded options, adds every planned file in order,
//! and exits with the failure count; the driver runs in a fresh `node`
//! subprocess per run.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{Map, Value, json};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::config::TaskConfig;

/// Errors from the test-execution boundary.
///
/// An `Io` here is the synchronous-crash case: the driver could not even be
/// written or spawned. Test failures are not errors; they come back in
/// [`RunOutcome`].
#[derive(Debug, Error)]
pub enum ExecError {
    /// Driver could not be written or spawned
    #[error("failed to start test driver: {0}")]
    Io(#[from] std::io::Error),

    /// Driver process was terminated without an exit code
    #[error("test driver terminated by signal")]
    Interrupted,
}

/// Execution options forwarded to the driver
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Mocha UI style
    pub ui: String,
    /// Mocha reporter name
    pub reporter: String,
    /// Global identifiers tests are allowed to declare
    pub globals: Vec<String>,
    /// Per-test timeout in milliseconds
    pub timeout_ms: u64,
    /// Stop after the first failing test
    pub bail: bool,
    /// Slow-test threshold in milliseconds
    pub slow_ms: Option<u64>,
    /// Filter tests by name
    pub grep: Option<String>,
    /// Unrecognized options, forwarded verbatim
    pub extra: BTreeMap<String, Value>,
}

impl From<&TaskConfig> for RunOptions {
    fn from(config: &TaskConfig) -> Self {
        Self {
            ui: config.ui.clone(),
            reporter: config.reporter.clone(),
            globals: config.globals.clone(),
            timeout_ms: config.timeout_ms,
            bail: config.bail,
            slow_ms: config.slow_ms,
            grep: config.grep.clone(),
            extra: config.extra.clone(),
        }
    }
}

/// Everything one run needs: preload files, then test files, in load order,
/// plus the options and the globals to purge before loading anything
#[derive(Debug, Clone)]
pub struct ExecPlan {
    /// Files loaded before the tests (patched bootstrap, mocks, closure)
    pub preload_files: Vec<PathBuf>,
    /// The selected test files
    pub test_files: Vec<PathBuf>,
    /// Execution options
    pub options: RunOptions,
    /// Global identifiers leaked by a previous load, deleted up front
    pub purge_globals: Vec<String>,
}

impl ExecPlan {
    /// All files in load order: preloads first, then tests
    #[must_use]
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.preload_files.iter().chain(self.test_files.iter())
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    /// Number of failing tests
    pub failures: u32,
    /// Global identifier names present before anything was loaded
    pub globals_before: Vec<String>,
    /// Global identifier names present after the run
    pub globals_after: Vec<String>,
}

impl RunOutcome {
    /// Whether the run passed
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failures == 0
    }
}

/// The test-execution boundary
pub trait TestExecutor {
    /// Run the plan and report the failure count. Completion is awaited;
    /// the plan's scratch inputs stay alive until this returns.
    fn execute(&self, plan: &ExecPlan) -> Result<RunOutcome, ExecError>;
}

/// Executor that spawns a generated Mocha driver under `node`
#[derive(Debug, Clone)]
pub struct MochaExecutor {
    node_bin: String,
}

impl Default for MochaExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl MochaExecutor {
    /// Create an executor using `node` from `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self {
            node_bin: "node".to_string(),
        }
    }

    /// Create an executor using a specific node binary
    #[must_use]
    pub fn with_node_bin(node_bin: impl Into<String>) -> Self {
        Self {
            node_bin: node_bin.into(),
        }
    }
}

impl TestExecutor for MochaExecutor {
    fn execute(&self, plan: &ExecPlan) -> Result<RunOutcome, ExecError> {
        let report = NamedTempFile::new()?;

        let mut driver = NamedTempFile::new()?;
        driver.write_all(build_driver(plan, Some(report.path())).as_bytes())?;
        driver.flush()?;

        log::debug!("spawning {} with driver {}", self.node_bin, driver.path().display());
        let status = Command::new(&self.node_bin).arg(driver.path()).status()?;

        let failures = status.code().ok_or(ExecError::Interrupted)?;
        let (globals_before, globals_after) = read_report(report.path());

        Ok(RunOutcome {
            failures: u32::try_from(failures).unwrap_or(u32::MAX),
            globals_before,
            globals_after,
        })
    }
}

/// Driver-side report of global identifier names around the run
#[derive(Debug, Default, serde::Deserialize)]
struct GlobalsReport {
    #[serde(default)]
    before: Vec<String>,
    #[serde(default)]
    after: Vec<String>,
}

/// Read the globals report the driver wrote, if it got that far. A crash
/// before the report is written just means no snapshot data this run.
fn read_report(path: &Path) -> (Vec<String>, Vec<String>) {
    let report: GlobalsReport = fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default();
    (report.before, report.after)
}

/// Generate the Node driver script for a plan.
///
/// The driver snapshots global names, purges leaked globals, builds the
/// Mocha instance from the forwarded options, adds every file in plan
/// order, runs, writes the globals report, and exits with the failure count
/// (capped to fit an exit code). A synchronous Mocha crash exits 255 with
/// the stack on stderr.
#[must_use]
pub fn build_driver(plan: &ExecPlan, report_path: Option<&Path>) -> String {
    let mut script = String::from("'use strict';\n");
    script.push_str("const __globalsBefore = Object.getOwnPropertyNames(global);\n");

    for name in &plan.purge_globals {
        script.push_str(&format!("delete global[{}];\n", json!(name)));
    }

    script.push_str("const Mocha = require('mocha');\n");
    script.push_str(&format!("const mocha = new Mocha({});\n", mocha_options(&plan.options)));

    for file in plan.files() {
        script.push_str(&format!("mocha.addFile({});\n", json!(file.display().to_string())));
    }

    let report = report_path.map_or(String::new(), |path| {
        format!(
            "    require('fs').writeFileSync({}, JSON.stringify({{\n      \
             before: __globalsBefore,\n      \
             after: Object.getOwnPropertyNames(global)\n    }}));\n",
            json!(path.display().to_string())
        )
    });

    script.push_str("try {\n");
    script.push_str("  mocha.run(function (failures) {\n");
    script.push_str(&report);
    script.push_str("    process.exit(Math.min(failures, 254));\n");
    script.push_str("  });\n");
    script.push_str("} catch (e) {\n  console.error(e.stack);\n  process.exit(255);\n}\n");
    script
}

/// Serialize the options object handed to the Mocha constructor. Recognized
/// fields first, then the verbatim extras (which cannot collide with
/// recognized names by construction).
fn mocha_options(options: &RunOptions) -> Value {
    let mut map = Map::new();
    map.insert("ui".to_string(), json!(options.ui));
    map.insert("reporter".to_string(), json!(options.reporter));
    map.insert("globals".to_string(), json!(options.globals));
    map.insert("timeout".to_string(), json!(options.timeout_ms));

    if options.bail {
        map.insert("bail".to_string(), json!(true));
    }
    if let Some(slow) = options.slow_ms {
        map.insert("slow".to_string(), json!(slow));
    }
    if let Some(grep) = &options.grep {
        map.insert("grep".to_string(), json!(grep));
    }

    for (key, value) in &options.extra {
        map.insert(key.clone(), value.clone());
    }

    Value::Object(map)
}
