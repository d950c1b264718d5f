//! Catalog entries and the resolved set.

use super::constraint::Constraint;
use super::requirement::Source;
use super::version::Version;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A dependency declared by a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDep {
    pub name: String,
    pub constraints: Vec<Constraint>,
}

/// One known `(name, version)` record with its direct dependencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub version: Version,
    pub dependencies: Vec<CatalogDep>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dep(mut self, name: impl Into<String>, constraints: Vec<Constraint>) -> Self {
        self.dependencies.push(CatalogDep {
            name: name.into(),
            constraints,
        });
        self
    }

    /// Names of the direct dependencies, in declaration order
    pub fn dependency_names(&self) -> Vec<String> {
        self.dependencies.iter().map(|d| d.name.clone()).collect()
    }
}

/// One selected library in the resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLibrary {
    pub name: String,
    pub version: Version,
    pub source: Source,
    /// Direct dependency names of the selected version; the emitter
    /// resolves these to versions through the map at emission time
    pub dependency_names: Vec<String>,
}

/// The authoritative selection: a name→version map plus the insertion
/// sequence. The two always agree on names and versions.
#[derive(Debug, Default)]
pub struct Resolution {
    map: HashMap<String, Version>,
    sequence: Vec<ResolvedLibrary>,
}

impl Resolution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a library. Returns false (and changes nothing) if the
    /// name is already present; no name appears twice.
    pub fn insert(&mut self, library: ResolvedLibrary) -> bool {
        if self.map.contains_key(&library.name) {
            return false;
        }
        self.map.insert(library.name.clone(), library.version);
        self.sequence.push(library);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn version_of(&self, name: &str) -> Option<Version> {
        self.map.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Libraries in insertion order
    pub fn libraries(&self) -> &[ResolvedLibrary] {
        &self.sequence
    }

    /// Check that the map and sequence agree on names and versions
    pub fn check_coherent(&self) -> bool {
        self.map.len() == self.sequence.len()
            && self
                .sequence
                .iter()
                .all(|lib| self.map.get(&lib.name) == Some(&lib.version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib(name: &str, version: Version) -> ResolvedLibrary {
        ResolvedLibrary {
            name: name.to_string(),
            version,
            source: Source::Registry,
            dependency_names: Vec::new(),
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut res = Resolution::new();
        assert!(res.insert(lib("rack", Version::new(3, 0, 8))));
        assert_eq!(res.version_of("rack"), Some(Version::new(3, 0, 8)));
        assert_eq!(res.len(), 1);
        assert!(res.check_coherent());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut res = Resolution::new();
        assert!(res.insert(lib("rack", Version::new(3, 0, 8))));
        assert!(!res.insert(lib("rack", Version::new(2, 2, 8))));
        assert_eq!(res.version_of("rack"), Some(Version::new(3, 0, 8)));
        assert_eq!(res.len(), 1);
        assert!(res.check_coherent());
    }

    #[test]
    fn test_sequence_preserves_insertion_order() {
        let mut res = Resolution::new();
        res.insert(lib("sinatra", Version::new(4, 0, 0)));
        res.insert(lib("rack", Version::new(3, 0, 8)));
        let names: Vec<_> = res.libraries().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["sinatra", "rack"]);
    }
}
