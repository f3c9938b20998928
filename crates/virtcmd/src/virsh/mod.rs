//! Backend that drives containers through the `virsh` tool.
//!
//! `virsh lxc-enter-namespace` joins a running LXC domain's namespaces
//! and executes a command there, and `virsh dumpxml` exposes the domain
//! definition we mine for the root filesystem path. Everything runs
//! through the external binary, so the daemon connection, privilege
//! handling and namespace plumbing stay libvirt's problem.

use std::path::PathBuf;
use std::process::Command;

use virtcmd_common::{DomainName, VirtcmdError, VirtcmdResult};

use crate::exec::{DomainExec, ExecOutcome};

mod domain_xml;

/// Connection URI used when none is configured.
pub const DEFAULT_CONNECT_URI: &str = "lxc:///";

/// Name of the libvirt client binary.
pub const DEFAULT_PROGRAM: &str = "virsh";

/// Domain executor backed by the `virsh` binary.
#[derive(Debug, Clone)]
pub struct Virsh {
    program: String,
    connect: String,
    shell: String,
}

impl Virsh {
    /// Create a backend for the given binary, connection URI and
    /// in-container shell.
    pub fn new(
        program: impl Into<String>,
        connect: impl Into<String>,
        shell: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            connect: connect.into(),
            shell: shell.into(),
        }
    }

    /// Arguments for running `command` inside `domain`.
    ///
    /// The command string is handed to a shell inside the container
    /// rather than being split here, so quoting survives the trip.
    fn enter_namespace_args(&self, domain: &DomainName, command: &str) -> Vec<String> {
        vec![
            "-c".to_string(),
            self.connect.clone(),
            "lxc-enter-namespace".to_string(),
            "--noseclabel".to_string(),
            domain.to_string(),
            "--cmd".to_string(),
            self.shell.clone(),
            "-c".to_string(),
            command.to_string(),
        ]
    }

    fn invoke(&self, args: &[String]) -> VirtcmdResult<ExecOutcome> {
        tracing::debug!(program = %self.program, ?args, "Invoking libvirt client");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| VirtcmdError::ToolSpawn {
                program: self.program.clone(),
                source: e,
            })?;

        Ok(output.into())
    }
}

impl Default for Virsh {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROGRAM,
            DEFAULT_CONNECT_URI,
            crate::exec::host::DEFAULT_SHELL,
        )
    }
}

impl DomainExec for Virsh {
    fn exec(&self, domain: &DomainName, command: &str) -> VirtcmdResult<ExecOutcome> {
        self.invoke(&self.enter_namespace_args(domain, command))
    }

    fn argv(&self, domain: &DomainName, command: &str) -> Vec<String> {
        let mut argv = vec![self.program.clone()];
        argv.extend(self.enter_namespace_args(domain, command));
        argv
    }

    fn root_path(&self, domain: &DomainName) -> VirtcmdResult<PathBuf> {
        let args = vec![
            "-c".to_string(),
            self.connect.clone(),
            "dumpxml".to_string(),
            domain.to_string(),
        ];

        let outcome = self.invoke(&args)?;
        if !outcome.success() {
            return Err(VirtcmdError::DomainRoot {
                domain: domain.to_string(),
                reason: String::from_utf8_lossy(&outcome.stderr).trim().to_string(),
            });
        }

        let xml = String::from_utf8_lossy(&outcome.stdout);
        match domain_xml::root_dir(&xml) {
            Ok(Some(dir)) => Ok(PathBuf::from(dir)),
            Ok(None) => Err(VirtcmdError::DomainRoot {
                domain: domain.to_string(),
                reason: "no filesystem device targets '/'".to_string(),
            }),
            Err(e) => Err(VirtcmdError::DomainRoot {
                domain: domain.to_string(),
                reason: format!("unparseable domain definition: {e}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argv_matches_documented_invocation() {
        let virsh = Virsh::new("virsh", "lxc:///", "/bin/sh");
        let domain = DomainName::new("cont1").unwrap();

        let argv = virsh.argv(&domain, "/sbin/shutdown -t now");
        assert_eq!(
            argv,
            vec![
                "virsh",
                "-c",
                "lxc:///",
                "lxc-enter-namespace",
                "--noseclabel",
                "cont1",
                "--cmd",
                "/bin/sh",
                "-c",
                "/sbin/shutdown -t now",
            ]
        );
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let virsh = Virsh::new("/nonexistent/virsh", "lxc:///", "/bin/sh");
        let domain = DomainName::new("cont1").unwrap();

        let err = virsh.exec(&domain, "true").unwrap_err();
        assert!(matches!(err, VirtcmdError::ToolSpawn { .. }));
    }
}
