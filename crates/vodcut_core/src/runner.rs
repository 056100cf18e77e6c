//! Blocking runner for external tool invocations.
//!
//! Every collaborator (ffmpeg, ffprobe, mkvextract, yt-dlp) is driven through
//! this runner: spawn, wait for exit, capture both output streams. One
//! invocation at a time; each call blocks until the external process exits.

use std::ffi::OsStr;
use std::process::{Command, Stdio};

/// Captured output of a finished external command.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: i32,
}

impl CommandOutput {
    /// Last `lines` stderr lines, for error reports.
    pub fn stderr_tail(&self, lines: usize) -> String {
        let all: Vec<&str> = self.stderr.lines().collect();
        let start = all.len().saturating_sub(lines);
        all[start..].join("\n")
    }
}

/// Runs external commands and captures their output.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run a command to completion, capturing stdout and stderr.
    ///
    /// Returns `Err` only when the process could not be spawned or waited on;
    /// a non-zero exit is reported through `CommandOutput`.
    pub fn run<S: AsRef<OsStr>>(&self, program: &str, args: &[S]) -> std::io::Result<CommandOutput> {
        let shown: Vec<&OsStr> = args.iter().map(AsRef::as_ref).collect();
        tracing::debug!("Running command: {} {:?}", program, shown);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}
