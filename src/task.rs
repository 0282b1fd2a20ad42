//! Task orchestration - wires manifest, resolver, closure, and executor
//!
//! One [`Task`] value holds the configuration and the global-state snapshot
//! across runs. Each run recomputes the resolved namespaces and the file
//! load order from scratch; the only state carried between runs is the
//! snapshot baseline and the previous run's surviving globals.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::bootstrap::{self, BootstrapError};
use crate::closure;
use crate::config::TaskConfig;
use crate::manifest::{DependencyManifest, ManifestError};
use crate::resolver;
use crate::runner::{ExecPlan, RunOptions, TestExecutor};
use crate::sanitizer::GlobalSnapshot;

/// Errors that abort a run outright
#[derive(Debug, Error)]
pub enum TaskError {
    /// Manifest missing or malformed
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Bootstrap file unreadable
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    /// IO error assembling the plan
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a run produced
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    /// Number of failing tests
    pub failures: u32,
    /// Number of files handed to the driver (preloads plus tests)
    pub files_loaded: usize,
    /// The single selected file did not exist; nothing ran
    pub no_tests: bool,
    /// The executor crashed before reporting asynchronously
    pub crashed: bool,
}

impl RunSummary {
    /// Whether the run counts as a success
    #[must_use]
    pub const fn passed(&self) -> bool {
        !self.crashed && self.failures == 0
    }
}

/// The unit-test task
#[derive(Debug)]
pub struct Task {
    config: TaskConfig,
    snapshot: GlobalSnapshot,
    last_globals: Vec<String>,
}

impl Task {
    /// Create a task with the given configuration
    #[must_use]
    pub fn new(config: TaskConfig) -> Self {
        Self {
            config,
            snapshot: GlobalSnapshot::new(),
            last_globals: Vec::new(),
        }
    }

    /// The task configuration
    #[must_use]
    pub const fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Compute the file load order for a selection without executing
    /// anything. Returns an empty order when the manifest file is absent.
    pub fn load_order(&self, selection: &[String]) -> Result<Vec<String>, TaskError> {
        let test_files = resolver::normalize_test_paths(selection);

        if !Path::new(&self.config.deps_path).exists() {
            return Ok(Vec::new());
        }

        let manifest = DependencyManifest::load(&self.config.deps_path, &self.config.prefix)?;
        let namespaces = resolver::resolve(&test_files, &manifest);
        Ok(closure::build_load_order(&namespaces, &manifest))
    }

    /// Run the selected tests through the executor.
    ///
    /// Manifest and bootstrap failures abort; an executor crash is caught
    /// here, logged with full detail, and reported as a failed run. Scratch
    /// files are released on every path.
    pub fn run(
        &mut self,
        selection: &[String],
        executor: &dyn TestExecutor,
    ) -> Result<RunSummary, TaskError> {
        let test_files = resolver::normalize_test_paths(selection);

        if test_files.len() == 1 && !Path::new(&test_files[0]).exists() {
            log::info!("No tests.");
            return Ok(RunSummary {
                no_tests: true,
                ..RunSummary::default()
            });
        }

        let purge_globals = self.snapshot.purge_list(&self.last_globals);

        // The scratch handle must outlive the executor call; the patched
        // bootstrap is deleted when this binding drops.
        let mut patched_bootstrap = None;
        let mut preload_files = Vec::new();

        if Path::new(&self.config.deps_path).exists() {
            let manifest = DependencyManifest::load(&self.config.deps_path, &self.config.prefix)?;
            let namespaces = resolver::resolve(&test_files, &manifest);
            let closure_files = closure::build_load_order(&namespaces, &manifest);
            log::debug!(
                "resolved {} namespace(s) to {} closure file(s)",
                namespaces.len(),
                closure_files.len()
            );

            let scratch = bootstrap::patch_bootstrap(&self.config.base_path)?;
            preload_files.push(scratch.path().to_path_buf());
            patched_bootstrap = Some(scratch);

            if let Some(mock_file) = &self.config.mock_file {
                preload_files.push(PathBuf::from(mock_file));
            }
            preload_files.extend(closure_files.into_iter().map(PathBuf::from));
        }

        let plan = ExecPlan {
            preload_files: absolutize(&preload_files)?,
            test_files: absolutize(&test_files.iter().map(PathBuf::from).collect::<Vec<_>>())?,
            options: RunOptions::from(&self.config),
            purge_globals,
        };
        let files_loaded = plan.files().count();

        let summary = match executor.execute(&plan) {
            Ok(outcome) => {
                self.snapshot.capture(outcome.globals_before.iter().cloned());
                self.last_globals = outcome.globals_after;
                RunSummary {
                    failures: outcome.failures,
                    files_loaded,
                    no_tests: false,
                    crashed: false,
                }
            },
            Err(err) => {
                log::error!("test execution crashed: {err}");
                RunSummary {
                    failures: 0,
                    files_loaded,
                    no_tests: false,
                    crashed: true,
                }
            },
        };

        drop(patched_bootstrap);
        Ok(summary)
    }
}

/// Resolve every path to absolute form without touching the filesystem
/// beyond the current directory lookup
fn absolutize(paths: &[PathBuf]) -> Result<Vec<PathBuf>, std::io::Error> {
    paths.iter().map(std::path::absolute).collect()
}
