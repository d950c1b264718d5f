//! Common utilities for benchmarks

use criterion::Criterion;
use grlk_catalog::{CatalogCache, CatalogSource};
use grlk_core::{CatalogEntry, GrlkResult, Version};
use pprof::criterion::{Output, PProfProfiler};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Generate a manifest with `gem_count` requirement lines
pub fn synthetic_manifest(gem_count: usize) -> String {
    let mut content = String::from("source 'https://rubygems.org/'\n\n");
    for i in 0..gem_count {
        content.push_str(&format!(
            "gem 'lib{:04}', '~> {}.{}'\n",
            i,
            i % 9 + 1,
            i % 10
        ));
    }
    content
}

/// Catalog source with several versions per synthetic library
pub struct SyntheticCatalog {
    pub gem_count: usize,
}

impl CatalogSource for SyntheticCatalog {
    fn populate(&self, cache: &CatalogCache) -> GrlkResult<()> {
        for i in 0..self.gem_count {
            let name = format!("lib{:04}", i);
            let major = (i % 9 + 1) as u16;
            let minor = (i % 10) as u16;
            for patch in 0..4u16 {
                cache.add(CatalogEntry::new(name.clone(), Version::new(major, minor, patch)));
            }
        }
        Ok(())
    }
}
