//! `grlk install` command implementation.
//!
//! Re-uses an existing lock by listing the selection stored in the
//! binary snapshot; runs full resolution when no lock is present.

use super::CommandContext;
use crate::pipeline::RunOutcome;
use grlk_core::GrlkResult;
use grlk_lockfile::snapshot;

pub fn execute(ctx: &CommandContext) -> GrlkResult<()> {
    let pipeline = ctx.pipeline();

    if pipeline.lock_path().exists() {
        if let Some(snap) = snapshot::read_snapshot(&pipeline.snapshot_path()) {
            ctx.output.info("Using resolution from Gemfile.lock");
            for record in &snap.records {
                ctx.output.line(&format!("  {} ({})", record.name, record.version));
            }
            ctx.output
                .success(&format!("{} gems ready", snap.records.len()));
            return Ok(());
        }
        // Lock exists but the snapshot is unusable; fall through to a
        // full resolution
        ctx.output.warn("Snapshot missing or invalid, re-resolving");
    }

    match pipeline.run()? {
        RunOutcome::FastPath => {
            ctx.output.success("using cached resolution");
        },
        RunOutcome::Resolved { gem_count, elapsed } => {
            ctx.output.success(&format!(
                "{} gems resolved in {:.1}ms",
                gem_count,
                elapsed.as_secs_f64() * 1000.0
            ));
        },
    }
    Ok(())
}
