//! GVM Settings and Configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::{GvmError, Result, paths};

/// GVM configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gradle wrapper distributions root (default: derived from the host)
    pub dists_dir: Option<PathBuf>,

    /// Active-version symlink (default: derived from the host)
    pub current_link: Option<PathBuf>,

    /// Program name prefix of installation directories and launchers
    pub runtime_name: String,

    /// Refuse `gvm use` unless running elevated
    pub require_privileges: bool,

    /// Stage the new link and rename it over the old one (Unix only)
    pub atomic_switch: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dists_dir: None,
            current_link: None,
            runtime_name: "gradle".to_string(),
            require_privileges: true,
            atomic_switch: false,
        }
    }
}

impl Settings {
    /// Load settings from the config file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from(&paths::config_file())?;
        settings.apply_env();
        Ok(settings)
    }

    /// Load settings from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&content)
            .map_err(|e| GvmError::Config(format!("{}: {e}", path.display())))?;

        if settings.runtime_name.trim().is_empty() {
            return Err(GvmError::Config(format!(
                "{}: runtime_name cannot be empty",
                path.display()
            )));
        }
        Ok(settings)
    }

    /// Apply `GVM_*` environment overrides
    pub fn apply_env(&mut self) {
        if let Some(dists) = paths::env_path("GVM_DISTS_DIR") {
            self.dists_dir = Some(dists);
        }
        if let Some(link) = paths::env_path("GVM_CURRENT_LINK") {
            self.current_link = Some(link);
        }
        if let Ok(value) = std::env::var("GVM_REQUIRE_PRIVILEGES") {
            match parse_bool(&value) {
                Some(flag) => self.require_privileges = flag,
                None => tracing::warn!("Ignoring GVM_REQUIRE_PRIVILEGES={value:?}: expected a boolean"),
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
