//! Dependency closure - computes the ordered file load order
//!
//! Given the resolved namespaces and the dependency manifest, a depth-first,
//! dependency-first traversal produces the ordered, deduplicated list of
//! source files to preload: every file appears after the files its
//! dependencies resolve to, and each file appears exactly once.

use std::collections::HashSet;

use crate::manifest::DependencyManifest;

/// Build the file load order for the given namespaces.
///
/// One output list is shared across the whole call: files scheduled while
/// resolving an earlier namespace are never re-emitted for a later one.
/// Namespaces absent from the manifest are externally provided and
/// contribute nothing. Cycles are broken by an in-progress marker set: a
/// namespace revisited while still on the active traversal path is treated
/// as already resolved, so traversal terminates on arbitrary graphs,
/// self-cycles included.
#[must_use]
pub fn build_load_order(namespaces: &[String], manifest: &DependencyManifest) -> Vec<String> {
    let mut files = Vec::new();
    let mut visiting = HashSet::new();

    for namespace in namespaces {
        visit(namespace, manifest, &mut files, &mut visiting);
    }

    files
}

fn visit(
    namespace: &str,
    manifest: &DependencyManifest,
    files: &mut Vec<String>,
    visiting: &mut HashSet<String>,
) {
    let Some(entry) = manifest.get(namespace) else {
        return;
    };

    if files.iter().any(|file| file == &entry.source_path) {
        return;
    }

    // On the active traversal path: a cycle. Whatever this namespace needs
    // is being scheduled further up the stack.
    if !visiting.insert(namespace.to_string()) {
        return;
    }

    for dependency in &entry.dependencies {
        visit(dependency, manifest, files, visiting);
    }

    visiting.remove(namespace);
    files.push(entry.source_path.clone());
}
