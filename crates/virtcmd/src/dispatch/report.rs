//! Execution reports.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::exec::ExecOutcome;

/// Return code reported when the command was never run.
pub const NOT_RUN_RC: i32 = 256;

/// Wall-clock timing of an execution.
#[derive(Debug, Clone, Serialize)]
pub struct Timing {
    /// When the command started.
    pub start: DateTime<Utc>,
    /// When the command finished.
    pub end: DateTime<Utc>,
    /// Duration in seconds.
    pub delta: f64,
}

/// Result of one request, serialized as the module's JSON output.
///
/// `failed: true` is an in-band result, not a crash: the report still
/// serializes and the process still exits zero so the caller can read
/// `rc`, `stdout` and `stderr`.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Whether the container was modified.
    pub changed: bool,
    /// Whether the request failed.
    pub failed: bool,
    /// Human-readable explanation for failures and skips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Captured standard output, trailing newlines stripped.
    pub stdout: String,
    /// Captured standard error, trailing newlines stripped.
    pub stderr: String,
    /// Exit code of the executed command. Guard skips report zero and
    /// fatal reports carry [`NOT_RUN_RC`].
    pub rc: i32,
    /// The full argv the command maps to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cmd: Vec<String>,
    /// Timing of the execution, absent when nothing ran.
    #[serde(flatten)]
    pub timing: Option<Timing>,
}

impl Report {
    /// Report for a run skipped because a `creates` path exists.
    #[must_use]
    pub fn skipped_exists(cmd: Vec<String>) -> Self {
        Self {
            changed: false,
            failed: false,
            msg: None,
            stdout: String::new(),
            stderr: String::new(),
            rc: 0,
            cmd,
            timing: None,
        }
    }

    /// Report for a run skipped by an `onlyif` or `unless` guard.
    ///
    /// The guard's own output is carried so a caller can see why the
    /// command was skipped.
    #[must_use]
    pub fn skipped(msg: impl Into<String>, outcome: &ExecOutcome, cmd: Vec<String>) -> Self {
        Self {
            changed: false,
            failed: false,
            msg: Some(msg.into()),
            stdout: clean(&outcome.stdout),
            stderr: clean(&outcome.stderr),
            rc: 0,
            cmd,
            timing: None,
        }
    }

    /// Report for a command that actually ran.
    #[must_use]
    pub fn executed(outcome: &ExecOutcome, cmd: Vec<String>, timing: Timing) -> Self {
        let failed = !outcome.success();
        Self {
            changed: !failed,
            failed,
            msg: failed.then(|| format!("command failed with code {}", outcome.code)),
            stdout: clean(&outcome.stdout),
            stderr: clean(&outcome.stderr),
            rc: outcome.code,
            cmd,
            timing: Some(timing),
        }
    }

    /// Report for a request that could not be dispatched at all.
    #[must_use]
    pub fn fatal(msg: impl Into<String>) -> Self {
        Self {
            changed: false,
            failed: true,
            msg: Some(msg.into()),
            stdout: String::new(),
            stderr: String::new(),
            rc: NOT_RUN_RC,
            cmd: Vec::new(),
            timing: None,
        }
    }
}

/// Decode captured output, stripping trailing newlines only.
fn clean(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}
