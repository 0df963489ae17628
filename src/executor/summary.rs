use std::path::PathBuf;

/// What happened during one pass over a flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps the operator agreed to complete, End steps included.
    pub completed: usize,
    pub skipped: usize,
    pub calculus_failures: usize,
    pub failed_imports: usize,
    /// Reports written by Output steps, in order.
    pub reports: Vec<PathBuf>,
}

impl RunSummary {
    pub fn reports_written(&self) -> usize {
        self.reports.len()
    }
}
