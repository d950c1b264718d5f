//! Pipeline orchestrator.
//!
//! Straight dispatch with an early return on the fast path: gate,
//! parse, populate catalog, resolve, emit text, write snapshot.
//! Stage timings are captured for telemetry only.

use grlk_catalog::{CatalogCache, CatalogSource, SeededSource};
use grlk_core::{GrlkResult, InputDigest};
use grlk_lockfile::gate::{self, GateDecision};
use grlk_lockfile::{snapshot, text};
use grlk_manifest::parse_manifest;
use grlk_resolver::Resolver;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

/// Outcome of one orchestrator invocation
#[derive(Debug)]
pub enum RunOutcome {
    /// The snapshot's stored digest matched the manifest; nothing was
    /// re-resolved or rewritten
    FastPath,
    Resolved { gem_count: usize, elapsed: Duration },
}

/// The resolution pipeline rooted at a working directory
pub struct Pipeline {
    root: PathBuf,
    source: Box<dyn CatalogSource>,
}

impl Pipeline {
    pub fn new(root: impl Into<PathBuf>, source: Box<dyn CatalogSource>) -> Self {
        Self {
            root: root.into(),
            source,
        }
    }

    /// Pipeline backed by the seeded reference catalog
    pub fn seeded(root: impl Into<PathBuf>) -> Self {
        Self::new(root, Box::new(SeededSource::new()))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("Gemfile")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.root.join("Gemfile.lock")
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join("Gemfile.lock.bin")
    }

    /// Run the orchestrator, honoring the fast path
    pub fn run(&self) -> GrlkResult<RunOutcome> {
        let (decision, digest) = gate::check(&self.manifest_path(), &self.snapshot_path())?;
        if decision == GateDecision::Skip {
            debug!("fast path hit");
            return Ok(RunOutcome::FastPath);
        }
        self.resolve_and_emit(digest)
    }

    /// Run a full resolution, ignoring any existing snapshot
    pub fn run_full(&self) -> GrlkResult<RunOutcome> {
        let digest = InputDigest::of_file(&self.manifest_path())?;
        self.resolve_and_emit(digest)
    }

    fn resolve_and_emit(&self, digest: InputDigest) -> GrlkResult<RunOutcome> {
        let start = Instant::now();

        let manifest = parse_manifest(&self.manifest_path())?;
        let parsed_at = Instant::now();

        let cache = CatalogCache::new();
        self.source.populate(&cache)?;
        let populated_at = Instant::now();

        let run = Resolver::new(&cache).resolve(&manifest.requirements)?;
        let resolved_at = Instant::now();

        text::write_lock_file(
            &self.lock_path(),
            &run.resolution,
            &manifest.requirements,
            manifest.registry_url.as_deref(),
        )?;
        snapshot::write_snapshot(&self.snapshot_path(), &run.resolution, &digest)?;

        debug!(
            parse_us = (parsed_at - start).as_micros() as u64,
            populate_us = (populated_at - parsed_at).as_micros() as u64,
            resolve_us = (resolved_at - populated_at).as_micros() as u64,
            emit_us = resolved_at.elapsed().as_micros() as u64,
            "pipeline stages"
        );

        Ok(RunOutcome::Resolved {
            gem_count: run.resolution.len(),
            elapsed: start.elapsed(),
        })
    }
}

/// Convenience constructor rooted at the current directory
pub fn current_dir_pipeline() -> GrlkResult<Pipeline> {
    let cwd = std::env::current_dir().map_err(|source| grlk_core::GrlkError::ManifestRead {
        path: Path::new(".").display().to_string(),
        source,
    })?;
    Ok(Pipeline::seeded(cwd))
}
