//! CLI module for GVM
//!
//! Handles command-line argument parsing and command dispatch.

use anyhow::Result;

mod args;
pub mod runtimes;
pub mod style;

pub use args::{Cli, Commands};

use crate::config::Settings;

/// Global context for CLI command execution
pub struct CliContext {
    pub settings: Settings,
    pub verbose: u8,
}

impl CliContext {
    #[must_use]
    pub fn new(settings: Settings, verbose: u8) -> Self {
        Self { settings, verbose }
    }
}

impl Commands {
    /// Execute the command
    pub fn execute(&self, ctx: &CliContext) -> Result<()> {
        match self {
            Commands::List { paths } => runtimes::list_versions(ctx, *paths),
            Commands::Use {
                version,
                dry_run,
                atomic,
            } => runtimes::use_version(ctx, version, *dry_run, *atomic),
            Commands::Current => runtimes::current(ctx),
            Commands::Config => runtimes::show_config(ctx),
            Commands::Completions { shell } => {
                runtimes::completions(*shell);
                Ok(())
            }
        }
    }
}
