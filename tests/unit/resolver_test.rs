//! Tests for namespace resolution
//!
//! The resolver maps selected test files to the namespaces whose
//! implementation files they exercise, always starting from the fixed
//! auxiliary namespaces.

use nstest::resolver::{self, AUX_NAMESPACES};

use crate::common::manifest;

// =============================================================================
// Resolution Tests
// =============================================================================

#[test]
fn empty_selection_yields_aux_only() {
    let m = manifest(&[("a", "a.js", &[]), ("b", "b.js", &["a"])]);
    let namespaces = resolver::resolve(&[], &m);
    assert_eq!(namespaces, AUX_NAMESPACES);
}

#[test]
fn empty_manifest_yields_aux_only() {
    let m = manifest(&[]);
    let namespaces = resolver::resolve(&["a_test.js".to_string()], &m);
    assert_eq!(namespaces, AUX_NAMESPACES);
}

#[test]
fn selected_test_file_resolves_its_namespace() {
    let m = manifest(&[("a", "a.js", &[]), ("b", "b.js", &["a"])]);
    let namespaces = resolver::resolve(&["a_test.js".to_string()], &m);

    assert_eq!(namespaces, vec!["goog.testing.events".to_string(), "a".to_string()]);
}

#[test]
fn unselected_namespaces_are_ignored() {
    let m = manifest(&[("a", "a.js", &[]), ("b", "b.js", &["a"])]);
    let namespaces = resolver::resolve(&["a_test.js".to_string()], &m);
    assert!(!namespaces.contains(&"b".to_string()));
}

#[test]
fn matching_is_exact_string_membership() {
    let m = manifest(&[("a", "js/a.js", &[])]);
    // Equivalent but differently-spelled paths do not match
    let namespaces = resolver::resolve(&["./js/a_test.js".to_string()], &m);
    assert_eq!(namespaces, AUX_NAMESPACES);
}

#[test]
fn manifest_order_determines_result_order() {
    let m = manifest(&[("z", "z.js", &[]), ("a", "a.js", &[])]);
    let selection = vec!["a_test.js".to_string(), "z_test.js".to_string()];
    let namespaces = resolver::resolve(&selection, &m);

    // Manifest declaration order wins, not selection order
    assert_eq!(
        namespaces,
        vec!["goog.testing.events".to_string(), "z".to_string(), "a".to_string()]
    );
}

#[test]
fn multiple_selected_files_resolve_each() {
    let m = manifest(&[("a", "a.js", &[]), ("b", "b.js", &[])]);
    let selection = vec!["a_test.js".to_string(), "b_test.js".to_string()];
    let namespaces = resolver::resolve(&selection, &m);
    assert_eq!(namespaces.len(), AUX_NAMESPACES.len() + 2);
}

// =============================================================================
// Path Normalization Tests
// =============================================================================

#[test]
fn normalize_leaves_test_paths_alone() {
    let files = vec!["app/button_test.js".to_string()];
    assert_eq!(resolver::normalize_test_paths(&files), files);
}

#[test]
fn normalize_inserts_marker_into_implementation_path() {
    let files = vec!["app/button.js".to_string()];
    assert_eq!(resolver::normalize_test_paths(&files), vec!["app/button_test.js".to_string()]);
}

#[test]
fn normalize_forces_js_extension() {
    let files = vec!["app/button_test.coffee".to_string()];
    assert_eq!(resolver::normalize_test_paths(&files), vec!["app/button_test.js".to_string()]);
}

#[test]
fn normalize_marks_and_rewrites_extension() {
    let files = vec!["app/button.coffee".to_string()];
    assert_eq!(resolver::normalize_test_paths(&files), vec!["app/button_test.js".to_string()]);
}
