//! Three-part version type with a packed 64-bit comparison form.
//!
//! Versions are immutable `(major, minor, patch)` triples of 16-bit
//! integers. Missing trailing components parse as zero; pre-release
//! suffixes are rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Three-part library version (major.minor.patch)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

/// Version parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version format: {input}")]
    InvalidFormat { input: String },

    #[error("Invalid number in version: {component}")]
    InvalidNumber { component: String },

    #[error("Pre-release suffixes are not supported: {input}")]
    PrereleaseUnsupported { input: String },
}

impl Version {
    pub const ZERO: Version = Version {
        major: 0,
        minor: 0,
        patch: 0,
    };

    /// Create a new version
    pub fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Pack into a single u64 with major most significant.
    ///
    /// Integer comparison of packed forms agrees with the tuple order.
    pub fn packed(&self) -> u64 {
        ((self.major as u64) << 32) | ((self.minor as u64) << 16) | self.patch as u64
    }

    /// Recover a version from its packed form
    pub fn from_packed(packed: u64) -> Self {
        Self {
            major: (packed >> 32) as u16,
            minor: (packed >> 16) as u16,
            patch: packed as u16,
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() > 3 {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        let mut components = [0u16; 3];
        for (i, part) in parts.iter().enumerate() {
            components[i] = part.parse().map_err(|_| {
                if part.chars().any(|c| c.is_ascii_alphabetic() || c == '-') {
                    VersionError::PrereleaseUnsupported {
                        input: input.to_string(),
                    }
                } else {
                    VersionError::InvalidNumber {
                        component: part.to_string(),
                    }
                }
            })?;
        }

        Ok(Version {
            major: components[0],
            minor: components[1],
            patch: components[2],
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
