//! Packed binary snapshot of a resolution.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! [0..4)   magic           = "GRLK"
//! [4..8)   format_version  = u32 = 1
//! [8..12)  library_count   = u32
//! [12..44) input_digest    = 32-byte SHA-256 of the manifest bytes
//! [44..)   library records
//! ```
//!
//! Each record: u16 name_length, u64 packed_version, u16 dep_count,
//! u8 source_tag, u8 reserved, name bytes, dep_count u32 dependency
//! indices into the record sequence (0 where unknown).

use grlk_core::{GrlkError, GrlkResult, InputDigest, Resolution, Version};
use std::path::Path;
use tracing::debug;

pub const MAGIC: [u8; 4] = *b"GRLK";
pub const FORMAT_VERSION: u32 = 1;
/// Fixed header length: magic + version + count + digest
pub const HEADER_LEN: usize = 44;

/// Decoded snapshot contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub digest: InputDigest,
    pub records: Vec<SnapshotRecord>,
}

/// One decoded library record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub name: String,
    pub version: Version,
    pub source_tag: u8,
    pub dep_indices: Vec<u32>,
}

/// Encode a resolution plus its input digest into snapshot bytes
pub fn encode(resolution: &Resolution, digest: &InputDigest) -> Vec<u8> {
    let libraries = resolution.libraries();

    let mut out = Vec::with_capacity(HEADER_LEN + libraries.len() * 32);
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&(libraries.len() as u32).to_le_bytes());
    out.extend_from_slice(digest.as_bytes());

    for lib in libraries {
        let dep_indices: Vec<u32> = lib
            .dependency_names
            .iter()
            .map(|dep| {
                libraries
                    .iter()
                    .position(|other| &other.name == dep)
                    .map(|i| i as u32)
                    .unwrap_or(0)
            })
            .collect();

        out.extend_from_slice(&(lib.name.len() as u16).to_le_bytes());
        out.extend_from_slice(&lib.version.packed().to_le_bytes());
        out.extend_from_slice(&(dep_indices.len() as u16).to_le_bytes());
        out.push(lib.source.tag_byte());
        out.push(0); // reserved
        out.extend_from_slice(lib.name.as_bytes());
        for index in dep_indices {
            out.extend_from_slice(&index.to_le_bytes());
        }
    }
    out
}

/// Decode snapshot bytes. Returns `None` on bad magic, unknown format
/// version, or truncation; the gate treats all of those as a miss.
pub fn decode(bytes: &[u8]) -> Option<Snapshot> {
    let digest = decode_header(bytes)?;
    let count = u32::from_le_bytes(bytes[8..12].try_into().ok()?) as usize;

    let mut records = Vec::with_capacity(count);
    let mut offset = HEADER_LEN;
    for _ in 0..count {
        if bytes.len() < offset + 14 {
            return None;
        }
        let name_len = u16::from_le_bytes(bytes[offset..offset + 2].try_into().ok()?) as usize;
        let packed = u64::from_le_bytes(bytes[offset + 2..offset + 10].try_into().ok()?);
        let dep_count = u16::from_le_bytes(bytes[offset + 10..offset + 12].try_into().ok()?) as usize;
        let source_tag = bytes[offset + 12];
        offset += 14;

        if bytes.len() < offset + name_len + dep_count * 4 {
            return None;
        }
        let name = std::str::from_utf8(&bytes[offset..offset + name_len])
            .ok()?
            .to_string();
        offset += name_len;

        let mut dep_indices = Vec::with_capacity(dep_count);
        for _ in 0..dep_count {
            dep_indices.push(u32::from_le_bytes(bytes[offset..offset + 4].try_into().ok()?));
            offset += 4;
        }

        records.push(SnapshotRecord {
            name,
            version: Version::from_packed(packed),
            source_tag,
            dep_indices,
        });
    }

    Some(Snapshot { digest, records })
}

/// Validate the fixed header and extract the stored input digest
pub fn decode_header(bytes: &[u8]) -> Option<InputDigest> {
    if bytes.len() < HEADER_LEN {
        return None;
    }
    if bytes[0..4] != MAGIC {
        return None;
    }
    let format_version = u32::from_le_bytes(bytes[4..8].try_into().ok()?);
    if format_version != FORMAT_VERSION {
        return None;
    }
    let digest: [u8; 32] = bytes[12..44].try_into().ok()?;
    Some(InputDigest::new(digest))
}

/// Write a snapshot file for a resolution
pub fn write_snapshot(
    path: &Path,
    resolution: &Resolution,
    digest: &InputDigest,
) -> GrlkResult<()> {
    let bytes = encode(resolution, digest);
    std::fs::write(path, &bytes).map_err(|source| GrlkError::SnapshotWrite {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote snapshot");
    Ok(())
}

/// Read and decode a snapshot file; `None` when missing or invalid
pub fn read_snapshot(path: &Path) -> Option<Snapshot> {
    let bytes = std::fs::read(path).ok()?;
    decode(&bytes)
}
