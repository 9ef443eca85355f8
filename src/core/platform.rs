//! Host platform detection
//!
//! Resolves the two paths the rest of GVM works with: the Gradle wrapper
//! distributions root and the active-version symlink. The layout is computed
//! once at startup and passed by value into the runtime manager.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::config::Settings;
use crate::core::{GvmError, Result};

/// Drive letter used when the system drive cannot be determined
const FALLBACK_DRIVE: char = 'C';

/// Where GVM is running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    /// Native Windows process
    WindowsNative,
    /// POSIX runtime on top of Windows (Cygwin)
    WindowsPosix,
    /// Windows Subsystem for Linux
    Wsl,
    /// Anything else; carries the OS name for the error message
    Unsupported(String),
}

impl Host {
    /// Probe the running host
    #[must_use]
    pub fn detect() -> Self {
        let proc_version = if cfg!(target_os = "linux") {
            std::fs::read_to_string("/proc/version")
                .map_err(|e| tracing::debug!("Could not read /proc/version: {e}"))
                .ok()
        } else {
            None
        };
        Self::from_probe(std::env::consts::OS, proc_version.as_deref())
    }

    /// Classify a host from the compile-time OS name and `/proc/version` contents
    #[must_use]
    pub fn from_probe(os: &str, proc_version: Option<&str>) -> Self {
        match os {
            "windows" => Self::WindowsNative,
            "cygwin" => Self::WindowsPosix,
            "linux"
                if proc_version.is_some_and(|v| v.to_lowercase().contains("microsoft")) =>
            {
                Self::Wsl
            }
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// Read the Windows system drive letter as seen from this host
    #[must_use]
    pub fn system_drive_letter(&self) -> Option<char> {
        let raw = match self {
            Self::WindowsNative | Self::WindowsPosix => std::env::var("SystemDrive").ok(),
            Self::Wsl => Command::new("cmd.exe")
                .args(["/c", "echo %SystemDrive%"])
                .output()
                .map_err(|e| tracing::warn!("Could not query the Windows system drive: {e}"))
                .ok()
                .filter(|o| o.status.success())
                .map(|o| String::from_utf8_lossy(&o.stdout).into_owned()),
            Self::Unsupported(_) => None,
        }?;
        parse_drive_letter(&raw)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowsNative => write!(f, "windows"),
            Self::WindowsPosix => write!(f, "windows (posix)"),
            Self::Wsl => write!(f, "wsl"),
            Self::Unsupported(os) => write!(f, "{os} (unsupported)"),
        }
    }
}

/// Extract the drive letter from `C:`, `c:\r\n` and friends
fn parse_drive_letter(raw: &str) -> Option<char> {
    let trimmed = raw.trim().trim_end_matches(['\\', '/']).trim_end_matches(':');
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
        _ => None,
    }
}

/// How a [`Layout`] was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutSource {
    /// Both paths came from settings or the environment
    Configured,
    /// Derived from the detected host
    Detected(Host),
}

/// The distributions root and active link GVM operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub dists_root: PathBuf,
    pub current_link: PathBuf,
    pub source: LayoutSource,
}

impl Layout {
    /// Build a layout from explicit paths
    #[must_use]
    pub fn new(dists_root: impl Into<PathBuf>, current_link: impl Into<PathBuf>) -> Self {
        Self {
            dists_root: dists_root.into(),
            current_link: current_link.into(),
            source: LayoutSource::Configured,
        }
    }

    /// Default layout for a host, given its system drive letter
    pub fn for_host(host: &Host, drive: char) -> Result<Self> {
        let (dists_root, current_link) = match host {
            Host::WindowsNative => {
                let d = drive.to_ascii_uppercase();
                (
                    format!("{d}:\\Tools\\Gradle\\wrapper\\dists"),
                    format!("{d}:\\Tools\\Gradle\\current"),
                )
            }
            Host::WindowsPosix | Host::Wsl => {
                let d = drive.to_ascii_lowercase();
                (
                    format!("/mnt/{d}/Tools/Gradle/wrapper/dists"),
                    format!("/mnt/{d}/Tools/Gradle/current"),
                )
            }
            Host::Unsupported(os) => return Err(GvmError::UnsupportedEnvironment(os.clone())),
        };
        Ok(Self {
            dists_root: PathBuf::from(dists_root),
            current_link: PathBuf::from(current_link),
            source: LayoutSource::Detected(host.clone()),
        })
    }

    /// Resolve the layout from settings, probing the host only when needed
    pub fn resolve(settings: &Settings) -> Result<Self> {
        if let (Some(dists), Some(link)) = (&settings.dists_dir, &settings.current_link) {
            return Ok(Self::new(dists, link));
        }

        let host = Host::detect();
        tracing::debug!("Detected host: {host}");
        Self::resolve_for(settings, &host)
    }

    /// Resolve against an already-detected host
    pub fn resolve_for(settings: &Settings, host: &Host) -> Result<Self> {
        let drive = host.system_drive_letter().unwrap_or(FALLBACK_DRIVE);
        let mut layout = Self::for_host(host, drive)?;
        if let Some(dists) = &settings.dists_dir {
            layout.dists_root.clone_from(dists);
        }
        if let Some(link) = &settings.current_link {
            layout.current_link.clone_from(link);
        }
        Ok(layout)
    }
}
