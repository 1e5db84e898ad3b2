/// Joins group names and the failing case name into a qualified name.
pub const QUALIFIER_SEPARATOR: &str = " -> ";

/// The aggregated result of running a registry.
///
/// `failed` holds qualified names relative to the registry that was run,
/// outermost group first. `leaf_count` counts cases only, groups are not counted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RunReport {
    pub failed: Vec<String>,
    pub leaf_count: usize,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn passed(&self) -> usize {
        self.leaf_count.saturating_sub(self.failed.len())
    }

    /// Record the outcome of one case at this level.
    pub fn record_case(&mut self, name: &str, passed: bool) {
        if !passed {
            self.failed.push(name.to_string());
        }
        self.leaf_count += 1;
    }

    /// Fold the report of a nested group into this one.
    ///
    /// Every failed name of `child` is prefixed with `group` and the separator.
    pub fn absorb(&mut self, group: &str, child: RunReport) {
        self.failed.extend(
            child
                .failed
                .into_iter()
                .map(|name| format!("{group}{QUALIFIER_SEPARATOR}{name}")),
        );
        self.leaf_count += child.leaf_count;
    }
}

/// Returned by a top level run when at least one case failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}/{} test(s) failed", .report.failed.len(), .report.leaf_count)]
pub struct RunFailed {
    pub report: RunReport,
}
