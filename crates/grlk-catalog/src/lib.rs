//! Catalog of known library versions for supergemlock.
//!
//! The cache maps a library name to the sequence of known
//! `CatalogEntry` records. It is populated by a `CatalogSource` before
//! resolution starts and then read concurrently by resolver workers.

pub mod cache;
pub mod source;

// Re-export main types
pub use cache::CatalogCache;
pub use source::{CatalogSource, SeededSource};
