//! Core types and algebra for the supergemlock resolver.
//!
//! This crate provides the version/constraint algebra, the shared data
//! model (requirements, catalog entries, resolutions), the unified error
//! type, and the SHA-256 input digest used by the fast-path gate.

pub mod digest;
pub mod error;
pub mod types;

// Re-export main types
pub use digest::InputDigest;
pub use error::{GrlkError, GrlkResult};
pub use types::{
    CatalogDep, CatalogEntry, Constraint, ConstraintOp, ConstraintParse, Resolution,
    ResolvedLibrary, RootRequirement, Source, Version, VersionError,
};
