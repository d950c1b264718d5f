//! Catalog sources.
//!
//! A `CatalogSource` fills the cache before resolution starts. The
//! reference implementation ships `SeededSource`, which loads an
//! embedded JSON universe; a network-backed source would implement the
//! same trait.

use crate::cache::CatalogCache;
use grlk_core::{CatalogEntry, Constraint, ConstraintParse, GrlkError, GrlkResult, Version};
use serde::Deserialize;
use std::str::FromStr;
use tracing::debug;

/// Abstract provider of catalog entries
pub trait CatalogSource {
    /// Populate the cache. Called exactly once, before resolver start.
    fn populate(&self, cache: &CatalogCache) -> GrlkResult<()>;
}

/// Seeded in-memory catalog backed by an embedded JSON document
#[derive(Debug, Default)]
pub struct SeededSource;

#[derive(Debug, Deserialize)]
struct SeedEntry {
    name: String,
    version: String,
    #[serde(default)]
    dependencies: Vec<SeedDep>,
}

#[derive(Debug, Deserialize)]
struct SeedDep {
    name: String,
    req: String,
}

const SEED_JSON: &str = include_str!("seed.json");

impl SeededSource {
    pub fn new() -> Self {
        Self
    }
}

impl CatalogSource for SeededSource {
    fn populate(&self, cache: &CatalogCache) -> GrlkResult<()> {
        let entries: Vec<SeedEntry> =
            serde_json::from_str(SEED_JSON).map_err(|e| GrlkError::CatalogLoad {
                message: format!("invalid seed document: {}", e),
            })?;

        for seed in entries {
            cache.add(seed_to_entry(seed)?);
        }

        debug!(
            names = cache.name_count(),
            entries = cache.entry_count(),
            "seeded catalog"
        );
        Ok(())
    }
}

fn seed_to_entry(seed: SeedEntry) -> GrlkResult<CatalogEntry> {
    let version = Version::from_str(&seed.version).map_err(|e| GrlkError::CatalogLoad {
        message: format!("{} {}: {}", seed.name, seed.version, e),
    })?;

    let mut entry = CatalogEntry::new(seed.name.clone(), version);
    for dep in seed.dependencies {
        let constraints = match Constraint::parse(&dep.req) {
            Ok(ConstraintParse::Parsed(c)) => vec![c],
            Ok(ConstraintParse::Skipped) => Vec::new(),
            Err(e) => {
                return Err(GrlkError::CatalogLoad {
                    message: format!("{} -> {} '{}': {}", seed.name, dep.name, dep.req, e),
                })
            },
        };
        entry = entry.with_dep(dep.name, constraints);
    }
    Ok(entry)
}
