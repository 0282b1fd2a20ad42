//! Tests for task orchestration
//!
//! The task wires the manifest, resolver, closure builder, bootstrap
//! patcher, and sanitizer into one run against a mock executor.

use nstest::config::TaskConfig;
use nstest::runner::{ExecError, RunOutcome};
use nstest::task::{Task, TaskError};

use crate::common::{MockExecutor, TestProject};

fn project_config(project: &TestProject) -> TaskConfig {
    TaskConfig {
        base_path: project.path("base.js"),
        deps_path: project.path("deps.js"),
        prefix: project.prefix(),
        mock_file: Some(project.path("mocks.js")),
        ..TaskConfig::default()
    }
}

// =============================================================================
// No-op Path
// =============================================================================

#[test]
fn single_missing_selection_is_a_noop() {
    let project = TestProject::new();
    let mut task = Task::new(project_config(&project));
    let executor = MockExecutor::passing();

    let summary = task.run(&[project.path("app/gone_test.js")], &executor).unwrap();

    assert!(summary.no_tests);
    assert!(summary.passed());
    assert_eq!(executor.calls(), 0);
}

#[test]
fn two_missing_selections_still_run() {
    let project = TestProject::new();
    let mut task = Task::new(project_config(&project));
    let executor = MockExecutor::passing();

    let selection = vec![project.path("a_test.js"), project.path("b_test.js")];
    let summary = task.run(&selection, &executor).unwrap();

    assert!(!summary.no_tests);
    assert_eq!(executor.calls(), 1);
}

// =============================================================================
// Plan Assembly
// =============================================================================

#[test]
fn plan_preloads_bootstrap_mock_then_closure() {
    let project = TestProject::new();
    project.add_file("mocks.js", "// mocks\n");
    let mut task = Task::new(project_config(&project));
    let executor = MockExecutor::passing();

    task.run(&[project.path("app/button_test.js")], &executor).unwrap();

    let plans = executor.plans.borrow();
    let plan = &plans[0];

    // Patched bootstrap scratch file first, then mock, then the closure in
    // dependency-first order
    assert_eq!(plan.preload_files.len(), 5);
    assert!(plan.preload_files[1].ends_with("mocks.js"));
    assert!(plan.preload_files[2].ends_with("testing/events.js"));
    assert!(plan.preload_files[3].ends_with("app/dom.js"));
    assert!(plan.preload_files[4].ends_with("app/button.js"));

    assert_eq!(plan.test_files.len(), 1);
    assert!(plan.test_files[0].ends_with("app/button_test.js"));
}

#[test]
fn plan_paths_are_absolute() {
    let project = TestProject::new();
    let mut task = Task::new(project_config(&project));
    let executor = MockExecutor::passing();

    task.run(&[project.path("app/button_test.js")], &executor).unwrap();

    let plans = executor.plans.borrow();
    assert!(plans[0].files().all(|file| file.is_absolute()));
}

#[test]
fn absent_manifest_runs_tests_bare() {
    let project = TestProject::new();
    let mut config = project_config(&project);
    config.deps_path = project.path("absent-deps.js");
    let mut task = Task::new(config);
    let executor = MockExecutor::passing();

    let summary = task.run(&[project.path("app/button_test.js")], &executor).unwrap();

    let plans = executor.plans.borrow();
    assert!(plans[0].preload_files.is_empty());
    assert_eq!(summary.files_loaded, 1);
}

#[test]
fn no_mock_file_configured() {
    let project = TestProject::new();
    let mut config = project_config(&project);
    config.mock_file = None;
    let mut task = Task::new(config);
    let executor = MockExecutor::passing();

    task.run(&[project.path("app/button_test.js")], &executor).unwrap();

    let plans = executor.plans.borrow();
    // Bootstrap plus three closure files
    assert_eq!(plans[0].preload_files.len(), 4);
}

// =============================================================================
// Error Policy
// =============================================================================

#[test]
fn malformed_manifest_aborts_the_run() {
    let project = TestProject::new();
    project.add_file("bad-deps.js", "module.exports = {};\n");
    let mut config = project_config(&project);
    config.deps_path = project.path("bad-deps.js");
    let mut task = Task::new(config);
    let executor = MockExecutor::passing();

    let result = task.run(&[project.path("app/button_test.js")], &executor);

    assert!(matches!(result, Err(TaskError::Manifest(_))));
    assert_eq!(executor.calls(), 0);
}

#[test]
fn unreadable_bootstrap_aborts_the_run() {
    let project = TestProject::new();
    let mut config = project_config(&project);
    config.base_path = project.path("absent-base.js");
    let mut task = Task::new(config);
    let executor = MockExecutor::passing();

    let result = task.run(&[project.path("app/button_test.js")], &executor);

    assert!(matches!(result, Err(TaskError::Bootstrap(_))));
    assert_eq!(executor.calls(), 0);
}

#[test]
fn executor_crash_is_caught_and_reported_failed() {
    let project = TestProject::new();
    let mut task = Task::new(project_config(&project));
    let executor = MockExecutor::passing()
        .respond_with(Err(ExecError::Io(std::io::Error::other("node not found"))));

    let summary = task.run(&[project.path("app/button_test.js")], &executor).unwrap();

    assert!(summary.crashed);
    assert!(!summary.passed());
}

#[test]
fn failure_count_flows_through() {
    let project = TestProject::new();
    let mut task = Task::new(project_config(&project));
    let executor = MockExecutor::passing().respond_with(Ok(RunOutcome {
        failures: 3,
        ..RunOutcome::default()
    }));

    let summary = task.run(&[project.path("app/button_test.js")], &executor).unwrap();

    assert_eq!(summary.failures, 3);
    assert!(!summary.passed());
}

// =============================================================================
// Sanitizer Flow
// =============================================================================

#[test]
fn second_run_purges_globals_leaked_by_the_first() {
    let project = TestProject::new();
    let mut task = Task::new(project_config(&project));
    let executor = MockExecutor::passing().respond_with(Ok(RunOutcome {
        failures: 0,
        globals_before: vec!["process".to_string(), "console".to_string()],
        globals_after: vec!["process".to_string(), "console".to_string(), "goog".to_string()],
    }));

    let selection = vec![project.path("app/button_test.js")];
    task.run(&selection, &executor).unwrap();
    task.run(&selection, &executor).unwrap();

    let plans = executor.plans.borrow();
    assert!(plans[0].purge_globals.is_empty());
    assert_eq!(plans[1].purge_globals, vec!["goog".to_string()]);
}

// =============================================================================
// Load Order Without Execution
// =============================================================================

#[test]
fn load_order_matches_closure() {
    let project = TestProject::new();
    let task = Task::new(project_config(&project));

    let order = task.load_order(&[project.path("app/button_test.js")]).unwrap();

    assert_eq!(
        order,
        vec![
            project.path("testing/events.js"),
            project.path("app/dom.js"),
            project.path("app/button.js"),
        ]
    );
}

#[test]
fn load_order_is_empty_without_manifest() {
    let project = TestProject::new();
    let mut config = project_config(&project);
    config.deps_path = project.path("absent-deps.js");
    let task = Task::new(config);

    let order = task.load_order(&[project.path("app/button_test.js")]).unwrap();
    assert!(order.is_empty());
}
