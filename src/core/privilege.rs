//! Privilege checks
//!
//! Writing the active Gradle link usually lives under a shared tools
//! directory, so `gvm use` only runs from an elevated process.

/// Check if we're running as root
#[cfg(unix)]
#[must_use]
pub fn is_privileged() -> bool {
    rustix::process::geteuid().is_root()
}

/// Check if we're running from an elevated (administrator) process
///
/// `net session` only succeeds for members of the Administrators group
/// holding an elevated token.
#[cfg(windows)]
#[must_use]
pub fn is_privileged() -> bool {
    std::process::Command::new("net")
        .arg("session")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(not(any(unix, windows)))]
#[must_use]
pub fn is_privileged() -> bool {
    false
}
