use anyhow::Result;
use clap::CommandFactory;

use crate::cli::{Cli, CliContext, style};
use crate::core::{GvmError, Layout, LayoutSource, is_privileged};
use crate::runtimes::{GradleManager, SwitchOptions};

/// Build the manager for the configured (or detected) layout
pub fn manager(ctx: &CliContext) -> Result<GradleManager> {
    let layout = Layout::resolve(&ctx.settings)?;
    tracing::debug!(
        "Distributions root: {}, active link: {}",
        layout.dists_root.display(),
        layout.current_link.display()
    );
    Ok(GradleManager::new(layout, &ctx.settings.runtime_name))
}

/// List installed Gradle versions
pub fn list_versions(ctx: &CliContext, show_paths: bool) -> Result<()> {
    let mgr = manager(ctx)?;

    println!("{}", style::header("Available Gradle versions:"));

    if show_paths {
        for install in mgr.installations()? {
            println!(
                " - {}  {}",
                style::version(&install.version),
                style::path(&install.path.display().to_string())
            );
        }
        return Ok(());
    }

    let current = mgr.current_version();
    for version in mgr.list_installed()? {
        if current.as_deref() == Some(version.as_str()) {
            println!(" - {} {}", style::version(&version), style::path("(current)"));
        } else {
            println!(" - {version}");
        }
    }
    Ok(())
}

/// Switch the active Gradle version
pub fn use_version(ctx: &CliContext, version: &str, dry_run: bool, atomic: bool) -> Result<()> {
    if ctx.settings.require_privileges && !is_privileged() {
        return Err(GvmError::PermissionDenied.into());
    }

    let mgr = manager(ctx)?;
    let opts = SwitchOptions {
        dry_run,
        verbose: ctx.verbose > 0,
        atomic: atomic || ctx.settings.atomic_switch,
    };

    mgr.switch(version, opts)?;
    Ok(())
}

/// Print the active Gradle version
pub fn current(ctx: &CliContext) -> Result<()> {
    let mgr = manager(ctx)?;
    match mgr.current_version() {
        Some(version) => println!("{version}"),
        None => println!(
            "No active Gradle version ({} is absent or not a Gradle link)",
            mgr.layout().current_link.display()
        ),
    }
    Ok(())
}

/// Print the resolved configuration
pub fn show_config(ctx: &CliContext) -> Result<()> {
    let layout = Layout::resolve(&ctx.settings)?;
    let source = match &layout.source {
        LayoutSource::Configured => "configured".to_string(),
        LayoutSource::Detected(host) => format!("detected ({host})"),
    };

    println!("{}", style::header("GVM configuration:"));
    println!("  config file:   {}", crate::core::paths::config_file().display());
    println!("  dists dir:     {}", layout.dists_root.display());
    println!("  current link:  {}", layout.current_link.display());
    println!("  layout:        {source}");
    println!("  runtime name:  {}", ctx.settings.runtime_name);
    println!("  require root:  {}", ctx.settings.require_privileges);
    println!("  atomic switch: {}", ctx.settings.atomic_switch);
    Ok(())
}

/// Print shell completions to stdout
pub fn completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
