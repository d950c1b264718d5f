//! Thread-safe catalog cache.

use dashmap::mapref::one::Ref;
use dashmap::DashMap;
use grlk_core::CatalogEntry;

/// Mapping from library name to the sequence of known versions.
///
/// Readers get a consistent view of the sequence for a name and never
/// block each other; writers append under the shard write lock.
/// Duplicates by `(name, version)` are permitted; the resolver's
/// already-resolved check deduplicates.
#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: DashMap<String, Vec<CatalogEntry>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the available set for its name
    pub fn add(&self, entry: CatalogEntry) {
        self.entries
            .entry(entry.name.clone())
            .or_default()
            .push(entry);
    }

    /// Read-only view of the available set for `name`
    pub fn versions_for(&self, name: &str) -> Option<Ref<'_, String, Vec<CatalogEntry>>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct names
    pub fn name_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of `(name, version)` records
    pub fn entry_count(&self) -> usize {
        self.entries.iter().map(|kv| kv.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grlk_core::Version;

    #[test]
    fn test_add_and_lookup() {
        let cache = CatalogCache::new();
        cache.add(CatalogEntry::new("rack", Version::new(2, 2, 8)));
        cache.add(CatalogEntry::new("rack", Version::new(3, 0, 8)));

        let versions = cache.versions_for("rack").unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].version, Version::new(2, 2, 8));
        assert_eq!(versions[1].version, Version::new(3, 0, 8));
    }

    #[test]
    fn test_missing_name() {
        let cache = CatalogCache::new();
        assert!(cache.versions_for("nope").is_none());
        assert!(!cache.contains("nope"));
    }

    #[test]
    fn test_duplicates_permitted() {
        let cache = CatalogCache::new();
        cache.add(CatalogEntry::new("rack", Version::new(3, 0, 8)));
        cache.add(CatalogEntry::new("rack", Version::new(3, 0, 8)));
        assert_eq!(cache.versions_for("rack").unwrap().len(), 2);
    }

    #[test]
    fn test_counts() {
        let cache = CatalogCache::new();
        assert!(cache.is_empty());
        cache.add(CatalogEntry::new("rack", Version::new(3, 0, 8)));
        cache.add(CatalogEntry::new("pg", Version::new(1, 5, 4)));
        cache.add(CatalogEntry::new("pg", Version::new(1, 0, 0)));
        assert_eq!(cache.name_count(), 2);
        assert_eq!(cache.entry_count(), 3);
    }

    #[test]
    fn test_concurrent_readers() {
        use std::sync::Arc;

        let cache = Arc::new(CatalogCache::new());
        for minor in 0..50 {
            cache.add(CatalogEntry::new("rack", Version::new(3, minor, 0)));
        }

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        let versions = cache.versions_for("rack").unwrap();
                        assert_eq!(versions.len(), 50);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
