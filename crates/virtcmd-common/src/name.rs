//! Libvirt domain name validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{VirtcmdError, VirtcmdResult};

/// A validated libvirt domain (container) name.
///
/// Domain names must:
/// - Be 1-64 characters long
/// - Contain only alphanumeric characters, hyphens, underscores and dots
/// - Start with an alphanumeric character
///
/// The leading-character rule also keeps a name from ever being parsed as
/// an option by the container tool the name is passed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainName(String);

impl DomainName {
    /// Maximum length of a domain name.
    pub const MAX_LENGTH: usize = 64;

    /// Create a new domain name, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the name format is invalid.
    pub fn new(name: impl Into<String>) -> VirtcmdResult<Self> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// Get the domain name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate a domain name string.
    fn validate(name: &str) -> VirtcmdResult<()> {
        if name.is_empty() || name.len() > Self::MAX_LENGTH {
            return Err(VirtcmdError::InvalidDomainName {
                name: name.to_string(),
            });
        }

        let first_char = name.chars().next().unwrap();
        if !first_char.is_ascii_alphanumeric() {
            return Err(VirtcmdError::InvalidDomainName {
                name: name.to_string(),
            });
        }

        for c in name.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
                return Err(VirtcmdError::InvalidDomainName {
                    name: name.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DomainName {
    type Err = VirtcmdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
