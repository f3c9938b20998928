//! Request validation, guard evaluation and command dispatch.
//!
//! The [`Dispatcher`] turns a [`Request`] into a [`Report`]. Validation
//! failures never panic and never escape as errors: they fold into a
//! fatal report so the caller always receives well-formed JSON.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use virtcmd_common::{DomainName, VirtcmdResult};

use crate::exec::{DomainExec, ExecOutcome, PathProbe, ShellRunner};

mod guard;
mod report;
mod request;

pub use guard::{Guard, GuardScope};
pub use report::{NOT_RUN_RC, Report, Timing};
pub use request::Request;

/// Executes requests against a shell, a domain backend and a
/// filesystem probe.
#[derive(Debug)]
pub struct Dispatcher<S, E, F> {
    shell: S,
    domains: E,
    fs: F,
}

impl<S: ShellRunner, E: DomainExec, F: PathProbe> Dispatcher<S, E, F> {
    /// Create a dispatcher over the given backends.
    pub fn new(shell: S, domains: E, fs: F) -> Self {
        Self { shell, domains, fs }
    }

    /// Execute a request and report the result.
    ///
    /// Every outcome becomes a [`Report`]; requests that cannot be
    /// dispatched at all fold into [`Report::fatal`].
    pub fn dispatch(&self, request: &Request) -> Report {
        match self.try_dispatch(request) {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(error = %err, "Request could not be dispatched");
                Report::fatal(err.to_string())
            }
        }
    }

    fn try_dispatch(&self, request: &Request) -> VirtcmdResult<Report> {
        let command = request.command()?;
        let domain = request.domain()?;
        let guard = request.guard()?;

        let argv = self.domains.argv(&domain, command);

        if let Some(guard) = &guard {
            if let Some(report) = self.evaluate(guard, request.guard_scope, &domain, &argv)? {
                return Ok(report);
            }
        }

        tracing::info!(domain = %domain, "Executing command in container");

        let start = Utc::now();
        let clock = Instant::now();
        let outcome = self.domains.exec(&domain, command)?;
        let timing = Timing {
            start,
            end: Utc::now(),
            delta: clock.elapsed().as_secs_f64(),
        };

        Ok(Report::executed(&outcome, argv, timing))
    }

    /// Evaluate a guard, returning the skip report when it holds.
    fn evaluate(
        &self,
        guard: &Guard,
        scope: GuardScope,
        domain: &DomainName,
        argv: &[String],
    ) -> VirtcmdResult<Option<Report>> {
        match guard {
            Guard::Creates(path) => {
                let target = self.creates_target(path, scope, domain)?;
                if self.fs.exists(&target) {
                    tracing::debug!(path = %target.display(), "Skipping, path already exists");
                    return Ok(Some(Report::skipped_exists(argv.to_vec())));
                }
                Ok(None)
            }
            Guard::OnlyIf(command) => {
                let outcome = self.run_guard(command, scope, domain)?;
                if !outcome.success() {
                    return Ok(Some(Report::skipped(
                        format!("Skipped since {command} did not return 0"),
                        &outcome,
                        argv.to_vec(),
                    )));
                }
                Ok(None)
            }
            Guard::Unless(command) => {
                let outcome = self.run_guard(command, scope, domain)?;
                if outcome.success() {
                    return Ok(Some(Report::skipped(
                        format!("Skipped since {command} returned 0"),
                        &outcome,
                        argv.to_vec(),
                    )));
                }
                Ok(None)
            }
        }
    }

    fn run_guard(
        &self,
        command: &str,
        scope: GuardScope,
        domain: &DomainName,
    ) -> VirtcmdResult<ExecOutcome> {
        match scope {
            GuardScope::Host => self.shell.run(command),
            GuardScope::Container => self.domains.exec(domain, command),
        }
    }

    /// Resolve where a `creates` path lives from the host's view.
    fn creates_target(
        &self,
        path: &Path,
        scope: GuardScope,
        domain: &DomainName,
    ) -> VirtcmdResult<PathBuf> {
        match scope {
            GuardScope::Host => Ok(path.to_path_buf()),
            GuardScope::Container => {
                let root = self.domains.root_path(domain)?;
                // An absolute path would replace the root wholesale in
                // join(), so it is made relative first.
                let relative = path.strip_prefix("/").unwrap_or(path);
                Ok(root.join(relative))
            }
        }
    }
}
