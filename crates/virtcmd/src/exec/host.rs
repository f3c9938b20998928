//! Host-side backends: a real shell and the local filesystem.

use std::path::Path;
use std::process::Command;

use virtcmd_common::{VirtcmdError, VirtcmdResult};

use super::{ExecOutcome, PathProbe, ShellRunner};

/// Shell used when none is configured.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Shell executor that runs `<shell> -c <command>` on the host.
#[derive(Debug, Clone)]
pub struct Sh {
    shell: String,
}

impl Sh {
    /// Create an executor for the given shell binary.
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for Sh {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl ShellRunner for Sh {
    fn run(&self, command: &str) -> VirtcmdResult<ExecOutcome> {
        tracing::debug!(shell = %self.shell, command, "Running host shell command");

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|e| VirtcmdError::GuardSpawn {
                command: command.to_string(),
                source: e,
            })?;

        Ok(output.into())
    }
}

/// Path probe backed by the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl PathProbe for HostFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
