//! Global state sanitation
//!
//! Loading a namespace codebase defines globals (`goog`, the app root
//! namespace, template registries) that outlive the run when the hosting
//! process is reused. The snapshot records which global identifiers existed
//! before the first load; any identifier that appeared since is pollution
//! and gets purged before the next load. This also prevents the bootstrap's
//! "Namespace already declared" error on re-runs.
//!
//! The snapshot is an explicit value owned by the task layer, captured at
//! most once per process lifetime and never invalidated.

use std::collections::BTreeSet;

/// Capture-once snapshot of global identifier names
#[derive(Debug, Clone, Default)]
pub struct GlobalSnapshot {
    baseline: Option<BTreeSet<String>>,
}

impl GlobalSnapshot {
    /// Create an empty, not-yet-captured snapshot
    #[must_use]
    pub const fn new() -> Self {
        Self { baseline: None }
    }

    /// Whether the baseline has been captured
    #[must_use]
    pub const fn captured(&self) -> bool {
        self.baseline.is_some()
    }

    /// Record the baseline identifier set. The first capture wins; later
    /// calls are no-ops.
    pub fn capture<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.baseline.is_none() {
            self.baseline = Some(names.into_iter().map(Into::into).collect());
        }
    }

    /// Identifiers in `current` that were not part of the baseline, in
    /// stable (sorted) order. Empty before the first capture.
    #[must_use]
    pub fn purge_list(&self, current: &[String]) -> Vec<String> {
        let Some(baseline) = &self.baseline else {
            return Vec::new();
        };

        let mut leaked: Vec<String> =
            current.iter().filter(|name| !baseline.contains(*name)).cloned().collect();
        leaked.sort();
        leaked.dedup();
        leaked
    }
}
