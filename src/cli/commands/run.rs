//! Run the selected tests

use nstest::output::{OutputMode, RunResult};
use nstest::runner::MochaExecutor;
use nstest::selection;
use nstest::task::Task;

use crate::cli::app::RunOpts;

use super::effective_config;

/// Resolve the dependency closure for the selection and run the tests
pub fn run(opts: &RunOpts, mode: OutputMode) -> anyhow::Result<()> {
    let config = effective_config(&opts.overrides)?;
    let files = selection::expand(&opts.patterns)?;

    let mut task = Task::new(config);
    let executor = MochaExecutor::new();
    let summary = task.run(&files, &executor)?;

    let result = RunResult::from(&summary);
    result.render(mode);

    if !summary.passed() {
        std::process::exit(1);
    }

    Ok(())
}
