//! `grlk check` command implementation.
//!
//! Existence check only in this version; satisfiability checking
//! arrives with a network-backed catalog.

use super::CommandContext;

/// Returns true when a lock file exists
pub fn execute(ctx: &CommandContext) -> bool {
    let lock_path = ctx.pipeline().lock_path();
    if lock_path.exists() {
        ctx.output.success("Gemfile.lock is present");
        true
    } else {
        ctx.output.warn("No Gemfile.lock found; run 'grlk install'");
        false
    }
}
