//! `grlk update` command implementation.
//!
//! Ignores any existing lock and re-runs full resolution. Requested
//! names are accepted for familiarity; this version always re-pins the
//! whole set.

use super::CommandContext;
use crate::pipeline::RunOutcome;
use grlk_core::GrlkResult;

pub fn execute(names: &[String], ctx: &CommandContext) -> GrlkResult<()> {
    if !names.is_empty() {
        ctx.output
            .info(&format!("Updating {} (full re-resolution)", names.join(", ")));
    }

    // run_full never takes the fast path
    if let RunOutcome::Resolved { gem_count, elapsed } = ctx.pipeline().run_full()? {
        ctx.output.success(&format!(
            "{} gems resolved in {:.1}ms",
            gem_count,
            elapsed.as_secs_f64() * 1000.0
        ));
    }
    Ok(())
}
