//! CLI command implementations

mod order;
mod run;

pub use order::order;
pub use run::run;

use nstest::config::TaskConfig;

use super::app::ConfigOverrides;

/// Load the effective config: explicit `--config`, else a discovered
/// `.nstest.toml`, else defaults; then apply CLI overrides on top.
pub(crate) fn effective_config(overrides: &ConfigOverrides) -> anyhow::Result<TaskConfig> {
    let mut config = match &overrides.config {
        Some(path) => TaskConfig::load(path)?,
        None => TaskConfig::discover(".")?,
    };

    if let Some(base_path) = &overrides.base_path {
        config.base_path = base_path.clone();
    }
    if let Some(deps_path) = &overrides.deps_path {
        config.deps_path = deps_path.clone();
    }
    if let Some(prefix) = &overrides.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(mock_file) = &overrides.mock_file {
        config.mock_file = Some(mock_file.clone());
    }
    if let Some(ui) = &overrides.ui {
        config.ui = ui.clone();
    }
    if let Some(reporter) = &overrides.reporter {
        config.reporter = reporter.clone();
    }
    if !overrides.globals.is_empty() {
        config.globals = overrides.globals.clone();
    }
    if let Some(timeout) = overrides.timeout {
        config.timeout_ms = timeout;
    }
    if overrides.bail {
        config.bail = true;
    }
    if let Some(slow) = overrides.slow {
        config.slow_ms = Some(slow);
    }
    if let Some(grep) = &overrides.grep {
        config.grep = Some(grep.clone());
    }

    Ok(config)
}
