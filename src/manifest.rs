//! Dependency manifest loading
//!
//! A namespace codebase declares its dependency graph in a generated
//! manifest file (conventionally `deps.js`) made of declarations like:
//!
//! ```text
//! goog.addDependency('../../../app/js/foo.js', ['app.foo'], ['goog.dom']);
//! ```
//!
//! Each provided namespace maps to the file that defines it plus the
//! namespaces that file requires. Declaration order is preserved: it is the
//! enumeration order every downstream consumer sees.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Errors that can occur while loading a dependency manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file does not exist
    #[error("manifest file not found: {0}")]
    NotFound(PathBuf),

    /// IO error while reading the manifest
    #[error("io error reading manifest: {0}")]
    Io(#[from] std::io::Error),

    /// File exists but contains no parseable dependency declarations
    #[error("no dependency declarations found in {0}")]
    NoDeclarations(PathBuf),
}

/// A single namespace's manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceEntry {
    /// Path of the file providing this namespace (prefix already applied)
    pub source_path: String,

    /// Namespaces this file requires before it can execute, in declared order
    pub dependencies: Vec<String>,
}

/// Mapping from namespace name to its entry, preserving declaration order.
///
/// A plain hash map would make every downstream ordering nondeterministic,
/// so an insertion-order index is kept alongside the map.
#[derive(Debug, Clone, Default)]
pub struct DependencyManifest {
    entries: HashMap<String, NamespaceEntry>,
    order: Vec<String>,
}

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"goog\.addDependency\(\s*['"]([^'"]+)['"]\s*,\s*\[([^\]]*)\]\s*,\s*\[([^\]]*)\]\s*\)"#,
    )
    .expect("declaration pattern is valid")
});

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]([^'"]+)['"]"#).expect("quoted pattern is valid"));

impl DependencyManifest {
    /// Create an empty manifest
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and parse a manifest file, prepending `prefix` to every
    /// declared path
    pub fn load(path: impl AsRef<Path>, prefix: &str) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let manifest = Self::parse(&content, prefix);

        if manifest.is_empty() && !content.trim().is_empty() {
            return Err(ManifestError::NoDeclarations(path.to_path_buf()));
        }

        Ok(manifest)
    }

    /// Parse manifest content. Lines that are not dependency declarations
    /// (comments, blanks) are skipped.
    #[must_use]
    pub fn parse(content: &str, prefix: &str) -> Self {
        let mut manifest = Self::new();

        for captures in DECLARATION.captures_iter(content) {
            let source_path = format!("{prefix}{}", &captures[1]);
            let provides = quoted_items(&captures[2]);
            let dependencies = quoted_items(&captures[3]);

            for namespace in provides {
                manifest.insert(
                    namespace,
                    NamespaceEntry {
                        source_path: source_path.clone(),
                        dependencies: dependencies.clone(),
                    },
                );
            }
        }

        manifest
    }

    /// Insert an entry. A re-declared namespace keeps its original position
    /// but takes the new entry.
    pub fn insert(&mut self, namespace: String, entry: NamespaceEntry) {
        if !self.entries.contains_key(&namespace) {
            self.order.push(namespace.clone());
        }
        self.entries.insert(namespace, entry);
    }

    /// Look up a namespace
    #[must_use]
    pub fn get(&self, namespace: &str) -> Option<&NamespaceEntry> {
        self.entries.get(namespace)
    }

    /// Whether a namespace is declared
    #[must_use]
    pub fn contains(&self, namespace: &str) -> bool {
        self.entries.contains_key(namespace)
    }

    /// Iterate entries in declaration order
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NamespaceEntry)> {
        self.order.iter().filter_map(|namespace| {
            self.entries.get(namespace).map(|entry| (namespace.as_str(), entry))
        })
    }

    /// Number of declared namespaces
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the manifest has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Extract the quoted strings from a declaration list body like
/// `'app.foo', 'app.bar'`
fn quoted_items(list: &str) -> Vec<String> {
    QUOTED.captures_iter(list).map(|c| c[1].to_string()).collect()
}
