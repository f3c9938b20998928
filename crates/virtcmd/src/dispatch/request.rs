//! Request parameters.

use std::path::PathBuf;

use serde::Deserialize;
use virtcmd_common::{DomainName, VirtcmdError, VirtcmdResult};

use crate::virsh::DEFAULT_CONNECT_URI;

use super::guard::{Guard, GuardScope};

fn default_connect() -> String {
    DEFAULT_CONNECT_URI.to_string()
}

/// One command execution request, as supplied by the caller.
///
/// The type deserializes straight from the args JSON the `module`
/// subcommand reads; the `run` subcommand builds it from flags. Field
/// validation is deferred to the accessors so a request can be
/// constructed freely and rejected with a precise error at dispatch
/// time.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Request {
    /// Command to run inside the container.
    #[serde(default)]
    pub cmd: String,
    /// Name of the target domain.
    #[serde(default)]
    pub container: String,
    /// Libvirt connection URI.
    #[serde(default = "default_connect")]
    pub connect: String,
    /// Skip execution when this path exists.
    #[serde(default)]
    pub creates: Option<PathBuf>,
    /// Run only when this command exits zero.
    #[serde(default)]
    pub onlyif: Option<String>,
    /// Skip execution when this command exits zero.
    #[serde(default)]
    pub unless: Option<String>,
    /// Where guards are evaluated.
    #[serde(default)]
    pub guard_scope: GuardScope,
}

impl Request {
    /// Create a request with defaults for everything but the command
    /// and container.
    pub fn new(cmd: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            container: container.into(),
            connect: default_connect(),
            creates: None,
            onlyif: None,
            unless: None,
            guard_scope: GuardScope::default(),
        }
    }

    /// Set a `creates` guard.
    #[must_use]
    pub fn with_creates(mut self, path: impl Into<PathBuf>) -> Self {
        self.creates = Some(path.into());
        self
    }

    /// Set an `onlyif` guard.
    #[must_use]
    pub fn with_onlyif(mut self, command: impl Into<String>) -> Self {
        self.onlyif = Some(command.into());
        self
    }

    /// Set an `unless` guard.
    #[must_use]
    pub fn with_unless(mut self, command: impl Into<String>) -> Self {
        self.unless = Some(command.into());
        self
    }

    /// Set the guard evaluation scope.
    #[must_use]
    pub fn with_guard_scope(mut self, scope: GuardScope) -> Self {
        self.guard_scope = scope;
        self
    }

    /// Set the libvirt connection URI.
    #[must_use]
    pub fn with_connect(mut self, uri: impl Into<String>) -> Self {
        self.connect = uri.into();
        self
    }

    /// The validated target domain.
    ///
    /// # Errors
    ///
    /// Returns an error if the container name is missing or malformed.
    pub fn domain(&self) -> VirtcmdResult<DomainName> {
        if self.container.is_empty() {
            return Err(VirtcmdError::MissingContainer);
        }
        DomainName::new(&self.container)
    }

    /// The guard to evaluate, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if more than one guard was supplied.
    pub fn guard(&self) -> VirtcmdResult<Option<Guard>> {
        let mut guards = Vec::new();
        if let Some(path) = &self.creates {
            guards.push(Guard::Creates(path.clone()));
        }
        if let Some(command) = &self.onlyif {
            guards.push(Guard::OnlyIf(command.clone()));
        }
        if let Some(command) = &self.unless {
            guards.push(Guard::Unless(command.clone()));
        }

        if guards.len() > 1 {
            return Err(VirtcmdError::MultipleGuards);
        }
        Ok(guards.pop())
    }

    /// The command to execute.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is empty or whitespace.
    pub fn command(&self) -> VirtcmdResult<&str> {
        if self.cmd.trim().is_empty() {
            return Err(VirtcmdError::EmptyCommand);
        }
        Ok(&self.cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_fills_defaults() {
        let request: Request =
            serde_json::from_str(r#"{"cmd": "date", "container": "cont1"}"#).unwrap();

        assert_eq!(request.command().unwrap(), "date");
        assert_eq!(request.domain().unwrap().as_str(), "cont1");
        assert_eq!(request.connect, "lxc:///");
        assert_eq!(request.guard_scope, GuardScope::Host);
        assert!(request.guard().unwrap().is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<Request, _> =
            serde_json::from_str(r#"{"cmd": "date", "container": "cont1", "sudo": true}"#);

        assert!(result.is_err());
    }

    #[test]
    fn each_guard_kind_is_extracted() {
        let request = Request::new("date", "cont1").with_creates("/etc/stamp");
        assert_eq!(
            request.guard().unwrap(),
            Some(Guard::Creates(PathBuf::from("/etc/stamp")))
        );

        let request = Request::new("date", "cont1").with_onlyif("test -f /etc/ready");
        assert_eq!(
            request.guard().unwrap(),
            Some(Guard::OnlyIf("test -f /etc/ready".to_string()))
        );

        let request = Request::new("date", "cont1").with_unless("grep -q done /var/log/run");
        assert_eq!(
            request.guard().unwrap(),
            Some(Guard::Unless("grep -q done /var/log/run".to_string()))
        );
    }

    #[test]
    fn multiple_guards_are_rejected() {
        let request = Request::new("date", "cont1")
            .with_creates("/etc/stamp")
            .with_unless("true");

        assert!(matches!(
            request.guard(),
            Err(VirtcmdError::MultipleGuards)
        ));
    }

    #[test]
    fn empty_or_blank_command_is_rejected() {
        let request = Request::new("", "cont1");
        assert!(matches!(request.command(), Err(VirtcmdError::EmptyCommand)));

        let request = Request::new("   \t", "cont1");
        assert!(matches!(request.command(), Err(VirtcmdError::EmptyCommand)));
    }

    #[test]
    fn command_keeps_surrounding_whitespace() {
        let request = Request::new(" date ", "cont1");
        assert_eq!(request.command().unwrap(), " date ");
    }

    #[test]
    fn guard_scope_deserializes_lowercase() {
        let request: Request = serde_json::from_str(
            r#"{"cmd": "date", "container": "cont1", "guard_scope": "container"}"#,
        )
        .unwrap();

        assert_eq!(request.guard_scope, GuardScope::Container);
    }
}
