//! Print the computed file load order

use nstest::output::{OrderResult, OutputMode};
use nstest::selection;
use nstest::task::Task;

use crate::cli::app::OrderOpts;

use super::effective_config;

/// Compute and print the file load order for the selection without
/// executing anything
pub fn order(opts: &OrderOpts, mode: OutputMode) -> anyhow::Result<()> {
    let config = effective_config(&opts.overrides)?;
    let files = selection::expand(&opts.patterns)?;

    let task = Task::new(config);
    let load_order = task.load_order(&files)?;

    OrderResult { files: load_order }.render(mode);
    Ok(())
}
