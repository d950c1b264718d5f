//! Fast-path gate.
//!
//! Compares the SHA-256 of the current manifest against the digest
//! stored in the last snapshot. Any snapshot problem (missing file,
//! wrong magic or format version, truncation) is a miss, not an error.
//! The gate never mutates on-disk state.

use crate::snapshot;
use grlk_core::{GrlkResult, InputDigest};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Outcome of the gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Stored digest matches; resolution can be skipped entirely
    Skip,
    /// No valid snapshot or the manifest changed; run full resolution
    Proceed,
}

/// Check whether the last snapshot still matches the manifest.
///
/// Returns the decision together with the manifest digest so the
/// caller can reuse it when writing the next snapshot. A missing or
/// unreadable manifest is an input error; snapshot problems are not.
pub fn check(manifest_path: &Path, snapshot_path: &Path) -> GrlkResult<(GateDecision, InputDigest)> {
    let current = InputDigest::of_file(manifest_path)?;

    let stored = read_stored_digest(snapshot_path);
    let decision = match stored {
        Some(stored) if stored == current => GateDecision::Skip,
        Some(_) => {
            debug!("snapshot digest differs, proceeding");
            GateDecision::Proceed
        },
        None => {
            debug!("no valid snapshot, proceeding");
            GateDecision::Proceed
        },
    };

    Ok((decision, current))
}

/// Read just the snapshot header and extract its stored digest
fn read_stored_digest(path: &Path) -> Option<InputDigest> {
    let mut file = std::fs::File::open(path).ok()?;
    let mut header = [0u8; snapshot::HEADER_LEN];
    file.read_exact(&mut header).ok()?;
    snapshot::decode_header(&header)
}
