//! Command execution backends.
//!
//! Everything that touches a process or the filesystem goes through a
//! trait in this module, so the dispatch logic stays testable without
//! libvirt on the box:
//! - [`ShellRunner`] runs a host shell command (guard evaluation)
//! - [`DomainExec`] runs a command inside a container and resolves its
//!   root filesystem
//! - [`PathProbe`] answers existence checks for `creates` guards

use std::path::{Path, PathBuf};

use virtcmd_common::{DomainName, VirtcmdResult};

pub mod host;

pub use host::{HostFs, Sh};

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Exit code, with fatal signals folded to `128 + signal`.
    pub code: i32,
    /// Raw bytes the process wrote to stdout.
    pub stdout: Vec<u8>,
    /// Raw bytes the process wrote to stderr.
    pub stderr: Vec<u8>,
}

impl ExecOutcome {
    /// Whether the process exited with code zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

impl From<std::process::Output> for ExecOutcome {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: exit_code(output.status),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Fold an exit status into a single code, mapping death by signal to
/// `128 + signal` the way shells report it.
fn exit_code(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .unwrap_or_else(|| 128 + status.signal().unwrap_or(0))
}

/// Runs a command line through a shell on the host.
pub trait ShellRunner {
    /// Run `command` via the configured shell and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell itself cannot be spawned. A command
    /// that runs and exits non-zero is an [`ExecOutcome`], not an error.
    fn run(&self, command: &str) -> VirtcmdResult<ExecOutcome>;
}

/// Runs commands inside a libvirt domain and inspects its definition.
pub trait DomainExec {
    /// Run `command` through a shell inside the domain's namespaces.
    ///
    /// # Errors
    ///
    /// Returns an error if the container tool cannot be spawned.
    fn exec(&self, domain: &DomainName, command: &str) -> VirtcmdResult<ExecOutcome>;

    /// The full argv this backend would invoke for `command`, for
    /// reporting.
    fn argv(&self, domain: &DomainName, command: &str) -> Vec<String>;

    /// Resolve the host path of the domain's root filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain definition cannot be fetched or
    /// carries no root filesystem mapping.
    fn root_path(&self, domain: &DomainName) -> VirtcmdResult<PathBuf>;
}

/// Answers path-existence checks.
pub trait PathProbe {
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;
}
