//! Parallel dependency resolver for supergemlock.
//!
//! Computes one selected version per library over the transitive
//! closure of the root requirements, using a pool of OS worker threads
//! over a shared LIFO work queue. Selection is greedy
//! highest-satisfying; conflicts are not negotiated.

mod pool;
mod select;

use grlk_catalog::CatalogCache;
use grlk_core::{GrlkError, GrlkResult, Resolution, RootRequirement};
use std::num::NonZeroUsize;
use std::sync::atomic::Ordering;
use std::sync::PoisonError;
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of one resolution run
#[derive(Debug)]
pub struct ResolutionRun {
    pub resolution: Resolution,
    /// Worker threads used (1 means the single-threaded path)
    pub worker_count: usize,
    pub elapsed: Duration,
}

/// Dependency resolver over a populated catalog cache
#[derive(Debug)]
pub struct Resolver<'a> {
    catalog: &'a CatalogCache,
}

impl<'a> Resolver<'a> {
    /// Create a resolver. The catalog must be fully populated; it is
    /// only read from here on.
    pub fn new(catalog: &'a CatalogCache) -> Self {
        Self { catalog }
    }

    /// Resolve the root requirements into a `Resolution`.
    ///
    /// Grouped requirements are kept out of the work set; requirements
    /// with no satisfying catalog version are dropped silently.
    pub fn resolve(&self, roots: &[RootRequirement]) -> GrlkResult<ResolutionRun> {
        let start = Instant::now();

        let seeds: Vec<String> = roots
            .iter()
            .filter(|r| r.in_work_set())
            .map(|r| r.name.clone())
            .collect();

        if seeds.is_empty() {
            return Ok(ResolutionRun {
                resolution: Resolution::new(),
                worker_count: 0,
                elapsed: start.elapsed(),
            });
        }

        let worker_count = thread_count(seeds.len());
        let shared = pool::SharedState::new(self.catalog, roots, seeds);

        if worker_count <= 1 {
            pool::worker_loop(&shared);
        } else {
            std::thread::scope(|scope| {
                for _ in 0..worker_count {
                    scope.spawn(|| pool::worker_loop(&shared));
                }
            });
        }
        // All workers have exited; the queue has drained.
        shared.done.store(true, Ordering::Release);

        let resolution = shared
            .resolution
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        if !resolution.check_coherent() {
            return Err(GrlkError::internal("resolution map and sequence disagree"));
        }

        debug!(
            libraries = resolution.len(),
            workers = worker_count,
            elapsed_us = start.elapsed().as_micros() as u64,
            "resolution complete"
        );
        Ok(ResolutionRun {
            resolution,
            worker_count,
            elapsed: start.elapsed(),
        })
    }
}

fn thread_count(root_count: usize) -> usize {
    let cpus = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    cpus.min(root_count).max(1)
}
