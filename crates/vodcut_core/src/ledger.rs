//! Completion tracking for idempotent re-runs.
//!
//! Output-file existence is the only cross-run synchronization mechanism:
//! a prior output is authoritative and is never overwritten. Planning logic
//! consults this abstraction instead of the filesystem directly so it can be
//! exercised without touching disk.

use std::path::Path;

/// Answers "has this output already been produced?".
pub trait CompletionLedger {
    fn already_produced(&self, output: &Path) -> bool;
}

/// Ledger backed by output-file existence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLedger;

impl CompletionLedger for FsLedger {
    fn already_produced(&self, output: &Path) -> bool {
        output.exists()
    }
}

/// In-memory ledger for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryLedger {
    produced: std::collections::HashSet<std::path::PathBuf>,
}

#[cfg(test)]
impl MemoryLedger {
    pub fn with(paths: &[&Path]) -> Self {
        Self {
            produced: paths.iter().map(|p| p.to_path_buf()).collect(),
        }
    }
}

#[cfg(test)]
impl CompletionLedger for MemoryLedger {
    fn already_produced(&self, output: &Path) -> bool {
        self.produced.contains(output)
    }
}
