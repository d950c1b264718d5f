//! Constraint merging and version selection.

use grlk_core::{CatalogEntry, Constraint, RootRequirement};

/// Collect every constraint declared at root level for `name`.
///
/// Only root-level constraints are merged; transitive constraints are
/// not re-validated against an already-selected library.
pub(crate) fn root_constraints(roots: &[RootRequirement], name: &str) -> Vec<Constraint> {
    roots
        .iter()
        .filter(|r| r.name == name)
        .flat_map(|r| r.constraints.iter().copied())
        .collect()
}

/// Pick the highest entry satisfying all constraints.
///
/// An empty constraint list is the implicit `>= 0.0.0`. Equal versions
/// compare equal, so the first occurrence in catalog insertion order
/// wins the tie.
pub(crate) fn pick_highest<'e>(
    entries: &'e [CatalogEntry],
    constraints: &[Constraint],
) -> Option<&'e CatalogEntry> {
    let mut best: Option<&CatalogEntry> = None;
    for entry in entries {
        if !constraints.iter().all(|c| c.satisfies(entry.version)) {
            continue;
        }
        match best {
            None => best = Some(entry),
            Some(current) if entry.version > current.version => best = Some(entry),
            _ => {},
        }
    }
    best
}
