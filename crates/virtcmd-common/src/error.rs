//! Common error types for virtcmd.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using [`VirtcmdError`].
pub type VirtcmdResult<T> = Result<T, VirtcmdError>;

/// Errors raised before, or instead of, a command result.
///
/// A command that ran and exited non-zero is not an error here; that is an
/// ordinary failed report. These variants cover the cases where the module
/// never got as far as a meaningful exit code.
#[derive(Error, Diagnostic, Debug)]
pub enum VirtcmdError {
    /// The command string was empty or whitespace.
    #[error("no command given")]
    #[diagnostic(code(virtcmd::request::no_command))]
    EmptyCommand,

    /// No target container was named.
    #[error("no container given")]
    #[diagnostic(code(virtcmd::request::no_container))]
    MissingContainer,

    /// The container name failed validation.
    #[error("invalid container name: {name}")]
    #[diagnostic(
        code(virtcmd::request::invalid_name),
        help("Domain names must start with an alphanumeric character and contain only alphanumerics, '-', '_' and '.', 1-64 characters")
    )]
    InvalidDomainName {
        /// The rejected name.
        name: String,
    },

    /// More than one of creates/onlyif/unless was supplied.
    #[error("creates, onlyif and unless can't be given at the same time")]
    #[diagnostic(
        code(virtcmd::request::multiple_guards),
        help("Supply at most one idempotency guard per request")
    )]
    MultipleGuards,

    /// A guard command could not be spawned at all.
    #[error("failed to run guard command '{command}': {source}")]
    #[diagnostic(code(virtcmd::guard::spawn))]
    GuardSpawn {
        /// The guard command that never started.
        command: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The container tool is missing or unexecutable.
    #[error("failed to run {program}: {source}")]
    #[diagnostic(
        code(virtcmd::exec::spawn),
        help("Check that the program is installed and executable")
    )]
    ToolSpawn {
        /// The program that could not be spawned.
        program: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The container root could not be resolved from the domain XML.
    #[error("failed to get container root for '{domain}': {reason}")]
    #[diagnostic(code(virtcmd::domain::root))]
    DomainRoot {
        /// The domain whose definition was inspected.
        domain: String,
        /// What went wrong.
        reason: String,
    },
}
