//! Shared data model for the resolution pipeline.

pub mod constraint;
pub mod requirement;
pub mod resolution;
pub mod version;

pub use constraint::{Constraint, ConstraintOp, ConstraintParse};
pub use requirement::{RootRequirement, Source};
pub use resolution::{CatalogDep, CatalogEntry, Resolution, ResolvedLibrary};
pub use version::{Version, VersionError};
