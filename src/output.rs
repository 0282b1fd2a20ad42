//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::task::RunSummary;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of a test run
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunResult {
    /// Whether the run passed
    pub passed: bool,
    /// Number of failing tests
    pub failures: u32,
    /// Number of files handed to the driver
    pub files_loaded: usize,
    /// Nothing was selected; nothing ran
    pub no_tests: bool,
    /// The test driver crashed before reporting
    pub crashed: bool,
}

impl From<&RunSummary> for RunResult {
    fn from(summary: &RunSummary) -> Self {
        Self {
            passed: summary.passed(),
            failures: summary.failures,
            files_loaded: summary.files_loaded,
            no_tests: summary.no_tests,
            crashed: summary.crashed,
        }
    }
}

impl RunResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => render_json(self),
        }
    }

    fn render_human(&self) {
        if self.no_tests {
            println!("No tests.");
        } else if self.crashed {
            println!("{}", "test driver crashed".red().bold());
        } else if self.passed {
            println!("{} ({} file(s) loaded)", "tests passed".green().bold(), self.files_loaded);
        } else {
            println!(
                "{} ({} file(s) loaded)",
                format!("{} failing", self.failures).red().bold(),
                self.files_loaded
            );
        }
    }
}

/// Result of a load-order computation
#[derive(Debug, Serialize)]
pub struct OrderResult {
    /// Source files in load order
    pub files: Vec<String>,
}

impl OrderResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                for file in &self.files {
                    println!("{file}");
                }
            },
            OutputMode::Json => render_json(self),
        }
    }
}

fn render_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to serialize output: {err}"),
    }
}
