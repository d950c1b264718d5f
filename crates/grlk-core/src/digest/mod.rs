//! Input digests for the fast-path gate.
//!
//! The digest is the SHA-256 of the manifest bytes as read; the binary
//! snapshot embeds it and the gate compares it on the next run.

use crate::error::{GrlkError, GrlkResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

/// A 32-byte SHA-256 digest of a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputDigest {
    bytes: [u8; 32],
}

impl InputDigest {
    /// Wrap raw digest bytes
    pub fn new(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Digest a byte slice
    pub fn compute(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        Self {
            bytes: hasher.finalize().into(),
        }
    }

    /// Digest a file's contents
    pub fn of_file(path: &Path) -> GrlkResult<Self> {
        let content = std::fs::read(path).map_err(|source| GrlkError::ManifestRead {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::compute(&content))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub fn from_hex(hex_str: &str) -> Option<Self> {
        let decoded = hex::decode(hex_str).ok()?;
        let bytes: [u8; 32] = decoded.try_into().ok()?;
        Some(Self { bytes })
    }
}

impl fmt::Display for InputDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Any single-byte modification changes the digest
    proptest! {
        #[test]
        fn single_byte_sensitivity(
            content in prop::collection::vec(any::<u8>(), 1..512),
            index in any::<prop::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let original = InputDigest::compute(&content);

            let mut mutated = content.clone();
            let i = index.index(mutated.len());
            mutated[i] ^= flip;

            prop_assert_ne!(original, InputDigest::compute(&mutated));
        }
    }
}
