//! # virtcmd-common
//!
//! Shared types for the virtcmd module:
//! - The common error type and result alias
//! - Validated libvirt domain names

#![warn(missing_docs)]

pub mod error;
pub mod name;

pub use error::{VirtcmdError, VirtcmdResult};
pub use name::DomainName;
