//! Error types for GVM with helpful suggestions

use std::path::PathBuf;

use thiserror::Error;

use super::paths;

/// Convenience Result type for GVM operations
pub type Result<T> = std::result::Result<T, GvmError>;

#[derive(Error, Debug)]
pub enum GvmError {
    #[error("Gradle version '{0}' does not exist.")]
    VersionNotFound(String),

    #[error("Distribution directory not found: {}", .0.display())]
    DiscoveryRootMissing(PathBuf),

    #[error("Permission denied: unable to remove {}: {source}", path.display())]
    LinkRemoval {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error creating symlink from {} to {}: {source}", from.display(), to.display())]
    LinkCreation {
        from: PathBuf,
        to: PathBuf,
        /// The previous link was already removed when creation failed
        replaced: bool,
        #[source]
        source: std::io::Error,
    },

    #[error("To write the Gradle version symlink, this command must be run as a privileged user.")]
    PermissionDenied,

    #[error("Unsupported platform, OS or runtime environment: {0}")]
    UnsupportedEnvironment(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GvmError {
    /// Get a helpful suggestion for how to fix this error
    #[must_use]
    pub fn suggestion(&self) -> Option<String> {
        let hint = match self {
            Self::VersionNotFound(_) => "Try: gvm list to see installed versions".to_string(),
            Self::DiscoveryRootMissing(_) => {
                "Run a Gradle wrapper build once, or point GVM_DISTS_DIR at your wrapper dists directory"
                    .to_string()
            }
            Self::LinkRemoval { .. } | Self::LinkCreation { .. } | Self::PermissionDenied => {
                "Try running with sudo (or an elevated shell on Windows)".to_string()
            }
            Self::UnsupportedEnvironment(_) => {
                "Set GVM_DISTS_DIR and GVM_CURRENT_LINK (or dists_dir/current_link in config.toml)"
                    .to_string()
            }
            Self::Config(_) => {
                let file = paths::config_file();
                format!(
                    "Check {} for syntax errors.\nReset with: rm {}",
                    file.display(),
                    file.display()
                )
            }
            Self::Io(_) => return None,
        };
        Some(hint)
    }

    /// Whether the old link was removed and no new one took its place
    #[must_use]
    pub fn left_link_missing(&self) -> bool {
        matches!(self, Self::LinkCreation { replaced: true, .. })
    }
}

/// Format an error with its suggestion for display
pub fn format_error_with_suggestion(err: &GvmError) -> String {
    let mut msg = format!("Error: {err}");
    if let Some(suggestion) = err.suggestion() {
        msg.push_str("\n\n💡 ");
        msg.push_str(&suggestion);
    }
    msg
}

/// Render any error that escaped the top level
///
/// Classified `GvmError`s get their suggestion; anything else is reported generically.
pub fn format_top_level(err: &anyhow::Error) -> String {
    match err.downcast_ref::<GvmError>() {
        Some(gvm) => format_error_with_suggestion(gvm),
        None => format!("An unexpected error occurred: {err:#}"),
    }
}
