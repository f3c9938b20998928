//! # virtcmd
//!
//! Idempotent command execution inside running libvirt LXC containers.
//!
//! virtcmd drives `virsh lxc-enter-namespace` to run a shell command in
//! a container's namespaces, optionally guarded by an idempotency
//! condition (`creates`, `onlyif` or `unless`), and emits a JSON report
//! an orchestration engine can consume: whether anything changed,
//! whether it failed, the exit code and the captured output.
//!
//! ## Usage
//!
//! ```no_run
//! use virtcmd::{Dispatcher, Request};
//! use virtcmd::exec::{HostFs, Sh};
//! use virtcmd::virsh::Virsh;
//!
//! let request = Request::new("/usr/bin/apt-get update", "cont1")
//!     .with_unless("test -f /var/cache/apt/pkgcache.bin");
//!
//! let dispatcher = Dispatcher::new(Sh::default(), Virsh::default(), HostFs);
//! let report = dispatcher.dispatch(&request);
//! println!("changed: {}", report.changed);
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod dispatch;
pub mod exec;
pub mod virsh;

pub use dispatch::{Dispatcher, Guard, GuardScope, Report, Request};
pub use virtcmd_common::{DomainName, VirtcmdError, VirtcmdResult};
