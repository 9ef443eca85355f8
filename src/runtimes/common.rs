//! Common utilities for runtime managers
//!
//! Version ordering and the low-level link operations used when switching versions.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Compare dotted numeric version strings (ascending, missing parts count as 0)
pub fn version_cmp(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<u64> = a
        .split(|c: char| !c.is_ascii_digit())
        .filter_map(|p| p.parse().ok())
        .collect();
    let b_parts: Vec<u64> = b
        .split(|c: char| !c.is_ascii_digit())
        .filter_map(|p| p.parse().ok())
        .collect();

    for i in 0..a_parts.len().max(b_parts.len()) {
        let a_part = a_parts.get(i).unwrap_or(&0);
        let b_part = b_parts.get(i).unwrap_or(&0);
        if a_part != b_part {
            return a_part.cmp(b_part);
        }
    }

    Ordering::Equal
}

/// Deduplicate by exact string and sort ascending by numeric components
///
/// Strings that compare numerically equal ("8.0" and "8.0.0") are both kept,
/// ordered by their text so the output is stable.
pub fn sort_versions<I, S>(versions: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = versions.into_iter().map(Into::into).collect();
    out.sort_by(|a, b| version_cmp(a, b).then_with(|| a.cmp(b)));
    out.dedup();
    out
}

/// Normalize a requested version string (trim, drop a leading 'v')
pub fn normalize_version(version: &str) -> String {
    let trimmed = version.trim();
    trimmed.strip_prefix('v').unwrap_or(trimmed).to_string()
}

/// Whether anything (file, directory, live or dangling symlink) sits at `path`
pub fn link_slot_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Remove whatever occupies the active link path
///
/// Symlinks and files are unlinked. A real directory is only removed when empty.
pub fn remove_link(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    let file_type = meta.file_type();

    if file_type.is_symlink() {
        remove_symlink(path)
    } else if file_type.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(unix)]
fn remove_symlink(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

#[cfg(windows)]
fn remove_symlink(path: &Path) -> io::Result<()> {
    // Directory symlinks are removed like directories on Windows
    fs::remove_dir(path).or_else(|_| fs::remove_file(path))
}

/// Create a directory symlink at `link` pointing to `target`
pub fn create_dir_link(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }
    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_dir(target, link)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = (target, link);
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "symbolic links are not supported on this platform",
        ))
    }
}

/// Read the target of the active link, if it is a symlink
pub fn read_link_target(link: &Path) -> Option<PathBuf> {
    fs::read_link(link).ok()
}
