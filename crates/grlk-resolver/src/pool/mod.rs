//! Worker pool state and the per-name resolution step.

use crate::select;
use grlk_catalog::CatalogCache;
use grlk_core::{Resolution, ResolvedLibrary, RootRequirement, Source, Version};
use std::sync::atomic::AtomicBool;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Consecutive empty queue observations before a worker exits
const MAX_IDLE_OBSERVATIONS: u32 = 16;
/// Spin iterations per empty observation before sleeping
const SPIN_PER_IDLE: u32 = 64;
const IDLE_SLEEP: Duration = Duration::from_micros(50);

/// State shared by all workers for one resolution run.
///
/// Both mutexes guard O(1) critical sections only; the resolution and
/// queue locks are never held at the same time.
pub(crate) struct SharedState<'a> {
    pub catalog: &'a CatalogCache,
    pub roots: &'a [RootRequirement],
    pub resolution: Mutex<Resolution>,
    pub queue: Mutex<Vec<String>>,
    pub done: AtomicBool,
}

impl<'a> SharedState<'a> {
    pub fn new(catalog: &'a CatalogCache, roots: &'a [RootRequirement], seeds: Vec<String>) -> Self {
        Self {
            catalog,
            roots,
            resolution: Mutex::new(Resolution::new()),
            queue: Mutex::new(seeds),
            done: AtomicBool::new(false),
        }
    }
}

// A poisoned lock means a sibling worker panicked; the guarded data is
// still structurally valid, so recover the guard.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Worker loop: pop names until the queue stays drained.
///
/// Every enqueue follows an insertion into the resolution map, so once
/// no worker is inserting, the queue monotonically drains and the
/// bounded-idle check is a safe exit condition.
pub(crate) fn worker_loop(shared: &SharedState<'_>) {
    let mut idle = 0u32;
    loop {
        let next = lock(&shared.queue).pop();
        match next {
            Some(name) => {
                idle = 0;
                resolve_name(shared, &name);
            },
            None => {
                idle += 1;
                if idle >= MAX_IDLE_OBSERVATIONS {
                    if lock(&shared.queue).is_empty() {
                        break;
                    }
                    idle = 0;
                    continue;
                }
                for _ in 0..SPIN_PER_IDLE {
                    std::hint::spin_loop();
                }
                std::thread::sleep(IDLE_SLEEP);
            },
        }
    }
}

/// Resolve a single name against the catalog and the root constraints.
pub(crate) fn resolve_name(shared: &SharedState<'_>, name: &str) {
    if lock(&shared.resolution).contains(name) {
        return;
    }

    let constraints = select::root_constraints(shared.roots, name);
    let source = shared
        .roots
        .iter()
        .find(|r| r.name == name)
        .map(|r| r.source.clone())
        .unwrap_or(Source::Registry);

    let picked = shared
        .catalog
        .versions_for(name)
        .and_then(|entries| {
            select::pick_highest(&entries, &constraints)
                .map(|entry| (entry.version, entry.dependency_names()))
        });

    let library = match picked {
        Some((version, dependency_names)) => ResolvedLibrary {
            name: name.to_string(),
            version,
            source,
            dependency_names,
        },
        None if source.is_registry() => {
            // Seeded catalogs are expected to be incomplete; an
            // unknown or unsatisfiable name is a no-op.
            debug!(name, "no satisfying catalog version, dropping");
            return;
        },
        // Vcs and path sources pass through without a catalog entry
        None => ResolvedLibrary {
            name: name.to_string(),
            version: Version::ZERO,
            source,
            dependency_names: Vec::new(),
        },
    };

    if !lock(&shared.resolution).insert(library.clone()) {
        return;
    }
    debug!(name, version = %library.version, "selected");

    if !library.dependency_names.is_empty() {
        let mut queue = lock(&shared.queue);
        for dep in &library.dependency_names {
            queue.push(dep.clone());
        }
    }
}
