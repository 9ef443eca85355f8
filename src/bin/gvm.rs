//! GVM CLI Binary
//!
//! The command-line interface for the Gradle Version Manager.

use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use gvm_lib::cli::{Cli, CliContext, style};
use gvm_lib::config::Settings;
use gvm_lib::core::{GvmError, format_top_level};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing (GVM_LOG overrides the level chosen on the command line)
    let filter =
        EnvFilter::try_from_env("GVM_LOG").unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(style::stderr_colors_enabled())
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(gvm) = err.downcast_ref::<GvmError>()
                && gvm.left_link_missing()
            {
                tracing::warn!("The active Gradle link is now missing; re-run `gvm use` once fixed");
            }
            eprintln!("{}", format_top_level(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let verbose = cli.verbosity();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings = Settings::load()?;
    let ctx = CliContext::new(settings, verbose);
    command.execute(&ctx)
}
