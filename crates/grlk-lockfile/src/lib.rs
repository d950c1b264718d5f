//! Lock output for supergemlock.
//!
//! Three coupled pieces: the textual `Gemfile.lock` emitter (Bundler
//! lock format), the packed binary snapshot (`Gemfile.lock.bin`) that
//! embeds the input digest, and the fast-path gate that compares that
//! digest on the next run.

pub mod gate;
pub mod snapshot;
pub mod text;

// Re-export main types
pub use gate::GateDecision;
pub use snapshot::{Snapshot, SnapshotRecord};
