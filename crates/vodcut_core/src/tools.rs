//! Preflight checks for required external tools.

use thiserror::Error;

/// One or more required tools are not on PATH.
#[derive(Debug, Error)]
#[error("required tools not found in PATH: {}", .missing.join(", "))]
pub struct MissingTools {
    pub missing: Vec<String>,
}

/// Verify that every named tool resolves through PATH.
pub fn check_tools(required: &[&str]) -> Result<(), MissingTools> {
    let missing: Vec<String> = required
        .iter()
        .filter(|tool| which::which(tool).is_err())
        .map(|tool| tool.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingTools { missing })
    }
}
