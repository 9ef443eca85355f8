//! Shared filesystem paths with test-friendly overrides.

use std::path::PathBuf;

pub(crate) fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn fallback_home_dir() -> PathBuf {
    home::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Config directory (default: XDG config dir or ~/.config/gvm).
#[must_use]
pub fn config_dir() -> PathBuf {
    env_path("GVM_CONFIG_DIR").unwrap_or_else(|| {
        dirs::config_dir()
            .map(|d| d.join("gvm"))
            .unwrap_or_else(|| fallback_home_dir().join(".config/gvm"))
    })
}

/// Config file path (`<config_dir>/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
