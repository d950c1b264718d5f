//! # grlk-cli
//!
//! Command-line surface for supergemlock. Hosts the pipeline
//! orchestrator (fast-path gate, parse, resolve, emit) shared by the
//! `supergemlock` binary and the `grlk` command router.

pub mod commands;
pub mod output;
pub mod pipeline;

pub use pipeline::{Pipeline, RunOutcome};

/// Install the tracing subscriber for a CLI process.
///
/// Diagnostics default to warnings; `RUST_LOG` overrides the filter.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();
}
