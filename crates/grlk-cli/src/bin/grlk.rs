//! `grlk` command router.
//!
//! Companion binary accepting `install`, `update [names…]`, `check`,
//! and `help` sub-commands around the same pipeline.

use clap::{CommandFactory, Parser};
use grlk_cli::commands::{self, CommandContext, Commands};
use grlk_cli::output::OutputHandler;
use std::process::ExitCode;

/// Command router for the supergemlock resolver
#[derive(Parser)]
#[command(name = "grlk", version, about = "Manage Gemfile dependency resolution")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    grlk_cli::init_tracing();

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        println!();
        return ExitCode::SUCCESS;
    };

    let output = OutputHandler::new();
    let ctx = match CommandContext::new() {
        Ok(ctx) => ctx,
        Err(err) => {
            output.error(&err.to_string());
            return ExitCode::FAILURE;
        },
    };

    match commands::dispatch_command(command, &ctx) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            ctx.output.error(&err.to_string());
            if let Some(suggestion) = err.suggestion() {
                ctx.output.info(suggestion);
            }
            ExitCode::FAILURE
        },
    }
}
