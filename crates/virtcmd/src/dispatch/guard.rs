//! Idempotency guards.

use std::path::PathBuf;

use serde::Deserialize;

/// A condition that can skip command execution.
///
/// At most one guard applies to a request. A skipped run reports
/// `changed: false` and is a success from the caller's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// Skip when this path already exists.
    Creates(PathBuf),
    /// Run only when this command exits zero.
    OnlyIf(String),
    /// Skip when this command exits zero.
    Unless(String),
}

/// Where guard conditions are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GuardScope {
    /// Evaluate guards on the host. `creates` paths are host paths and
    /// `onlyif`/`unless` run through the host shell.
    #[default]
    Host,
    /// Evaluate guards inside the container. `creates` paths are
    /// container paths, resolved through the domain's root filesystem,
    /// and guard commands run in the container's namespaces.
    Container,
}
