//! Command-line argument definitions using clap derive macros.

use clap::{ArgAction, Parser, Subcommand};

/// GVM - Gradle Version Manager
///
/// Lists the Gradle distributions unpacked by the Gradle wrapper and switches
/// the active one by repointing a single symlink.
#[derive(Parser, Debug)]
#[command(name = "gvm")]
#[command(version)]
#[command(about = "Switch between installed Gradle versions", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print extra information about the actions being performed (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Set the log level: 0 for errors, 1 for info, 2 for debug
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub log_level: Option<u8>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Effective verbosity from `-v` and `--log-level`
    #[must_use]
    pub fn verbosity(&self) -> u8 {
        self.verbose.max(self.log_level.unwrap_or(0))
    }

    /// Default tracing filter for the effective verbosity
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity() {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available Gradle versions
    #[command(visible_alias = "ls")]
    List {
        /// Also show the installation directory of every match
        #[arg(long)]
        paths: bool,
    },

    /// Switch to a Gradle version (requires a privileged user)
    Use {
        /// The Gradle version to switch to (e.g. 8.5)
        #[arg(id = "gradle_version", value_name = "VERSION")]
        version: String,
        /// Print the intended actions without making any changes
        #[arg(long)]
        dry_run: bool,
        /// Stage the new link and rename it over the old one (Unix only)
        #[arg(long)]
        atomic: bool,
    },

    /// Show the Gradle version the active link points at
    Current,

    /// Show the resolved distributions directory and active link
    Config,

    /// Print shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
