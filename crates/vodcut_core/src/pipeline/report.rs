//! Run reporting.

use chrono::{DateTime, Local};

/// Outcome of one unit of work (one segment, one asset).
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// Produced fresh output.
    Done,
    /// Nothing to do; prior output or policy made the unit a no-op.
    Skipped(String),
    /// The unit failed; siblings keep processing.
    Failed(String),
}

/// Aggregated results for a whole run.
#[derive(Debug)]
pub struct RunReport {
    started: DateTime<Local>,
    /// Units that produced fresh output.
    pub completed: Vec<String>,
    /// Units satisfied without work, with the reason.
    pub skipped: Vec<String>,
    /// Units that failed, with the reason.
    pub failed: Vec<String>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            started: Local::now(),
            completed: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Record one unit's outcome.
    pub fn record(&mut self, item: impl Into<String>, outcome: ItemOutcome) {
        let item = item.into();
        match outcome {
            ItemOutcome::Done => self.completed.push(item),
            ItemOutcome::Skipped(reason) => self.skipped.push(format!("{}: {}", item, reason)),
            ItemOutcome::Failed(reason) => self.failed.push(format!("{}: {}", item, reason)),
        }
    }

    /// True when no unit failed.
    pub fn all_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of units recorded.
    pub fn total(&self) -> usize {
        self.completed.len() + self.skipped.len() + self.failed.len()
    }

    /// One-line summary for the end of a run.
    pub fn summary(&self) -> String {
        format!(
            "{} done, {} skipped, {} failed (started {})",
            self.completed.len(),
            self.skipped.len(),
            self.failed.len(),
            self.started.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
