//! Namespace resolution - maps selected test files to namespaces
//!
//! A test file `foo_test.js` exercises the namespace provided by `foo.js`.
//! Given the selected test files and the dependency manifest, resolution
//! produces the ordered set of namespaces whose implementation files
//! correspond to a selected test, always preceded by the auxiliary
//! namespaces the test harness itself needs.

use crate::manifest::DependencyManifest;

/// Namespaces required by the test harness regardless of which tests were
/// selected. `goog.testing.events` drives DOM event simulation.
pub const AUX_NAMESPACES: &[&str] = &["goog.testing.events"];

/// Marker distinguishing a test file from the implementation file it
/// exercises: `foo.js` ↔ `foo_test.js`.
pub const TEST_MARKER: &str = "_test";

/// Resolve the selected test files to their namespaces.
///
/// For every manifest entry, in manifest order, the expected test path is
/// derived by inserting the test marker before the `.js` extension of the
/// entry's source path; an exact string match against `test_files` selects
/// the namespace. No sorting, no errors: an empty selection yields only the
/// auxiliary namespaces.
#[must_use]
pub fn resolve(test_files: &[String], manifest: &DependencyManifest) -> Vec<String> {
    let mut namespaces: Vec<String> =
        AUX_NAMESPACES.iter().map(|namespace| (*namespace).to_string()).collect();

    for (namespace, entry) in manifest.iter() {
        let expected = entry.source_path.replacen(".js", &format!("{TEST_MARKER}.js"), 1);
        if test_files.iter().any(|file| *file == expected) {
            namespaces.push(namespace.to_string());
        }
    }

    namespaces
}

/// Normalize raw selected paths to test-file form.
///
/// Watch-style tooling hands over implementation paths and paths with stale
/// extensions; each selection gets the test marker inserted before its first
/// extension dot (when missing) and its final extension forced to `js`.
#[must_use]
pub fn normalize_test_paths(files: &[String]) -> Vec<String> {
    files
        .iter()
        .map(|file| {
            let marked = if file.contains(&format!("{TEST_MARKER}.")) {
                file.clone()
            } else {
                file.replacen('.', &format!("{TEST_MARKER}."), 1)
            };
            let mut chunks: Vec<&str> = marked.split('.').collect();
            if let Some(last) = chunks.last_mut() {
                *last = "js";
            }
            chunks.join(".")
        })
        .collect()
}
