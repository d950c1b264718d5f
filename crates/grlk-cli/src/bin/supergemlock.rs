//! `supergemlock` entry point.
//!
//! With no arguments, runs the resolution pipeline in the current
//! directory: fast-path gate first, then parse, resolve, and emit.

use clap::Parser;
use grlk_cli::output::OutputHandler;
use grlk_cli::pipeline::{current_dir_pipeline, RunOutcome};
use grlk_core::GrlkError;
use std::process::ExitCode;

/// Millisecond-class dependency resolution for Gemfiles
#[derive(Parser)]
#[command(
    name = "supergemlock",
    version,
    about = "Resolve a Gemfile into a pinned Gemfile.lock",
    disable_version_flag = true
)]
struct Cli {
    /// Print program name and version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> ExitCode {
    let _cli = Cli::parse();
    grlk_cli::init_tracing();

    let output = OutputHandler::new();
    let pipeline = match current_dir_pipeline() {
        Ok(pipeline) => pipeline,
        Err(err) => return report(&err, &output),
    };

    match pipeline.run() {
        Ok(RunOutcome::FastPath) => {
            output.success("using cached resolution");
            ExitCode::SUCCESS
        },
        Ok(RunOutcome::Resolved { gem_count, elapsed }) => {
            output.success(&format!(
                "{} gems resolved in {:.1}ms",
                gem_count,
                elapsed.as_secs_f64() * 1000.0
            ));
            ExitCode::SUCCESS
        },
        Err(err) => report(&err, &output),
    }
}

fn report(err: &GrlkError, output: &OutputHandler) -> ExitCode {
    output.error(&err.to_string());
    if let Some(suggestion) = err.suggestion() {
        output.info(suggestion);
    }
    ExitCode::FAILURE
}
