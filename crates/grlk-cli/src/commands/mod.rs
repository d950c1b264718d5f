//! Command implementations and dispatch for the `grlk` router.

use crate::output::OutputHandler;
use crate::pipeline::Pipeline;
use clap::Subcommand;
use grlk_core::GrlkResult;
use std::path::PathBuf;
use tracing::info;

pub mod check;
pub mod install;
pub mod update;

/// Sub-commands accepted by the command router
#[derive(Subcommand)]
pub enum Commands {
    /// Install dependencies, re-using the lock file when present
    Install,
    /// Ignore the lock file and re-run full resolution
    Update {
        /// Libraries to update (full resolution re-pins everything)
        names: Vec<String>,
    },
    /// Report whether a lock file exists
    Check,
}

/// Shared context for all commands
pub struct CommandContext {
    pub root: PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    pub fn new() -> GrlkResult<Self> {
        let root = std::env::current_dir().map_err(|source| grlk_core::GrlkError::ManifestRead {
            path: ".".to_string(),
            source,
        })?;
        Ok(Self {
            root,
            output: OutputHandler::new(),
        })
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::seeded(self.root.clone())
    }
}

/// Dispatch a command to its handler; returns the process exit code
pub fn dispatch_command(command: Commands, ctx: &CommandContext) -> GrlkResult<u8> {
    match command {
        Commands::Install => {
            info!("installing dependencies");
            install::execute(ctx)?;
            Ok(0)
        },
        Commands::Update { names } => {
            info!(?names, "updating dependencies");
            update::execute(&names, ctx)?;
            Ok(0)
        },
        Commands::Check => {
            info!("checking lock file");
            Ok(if check::execute(ctx) { 0 } else { 1 })
        },
    }
}
