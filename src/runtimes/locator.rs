//! Gradle installation discovery
//!
//! Walks a wrapper distributions root looking for installation directories.
//! Two layouts are understood:
//!
//! - **Direct**: `root/gradle-8.5-bin/bin/gradle`
//! - **Wrapper cache**: `root/gradle-8.5-all/<hash>/gradle-8.5/bin/gradle`, where
//!   `<hash>` is the only child directory and ends in 25+ lowercase
//!   alphanumerics. Hash directories may nest arbitrarily deep.
//!
//! Unreadable directories are logged and pruned; they never abort the walk.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)] // Constant pattern
static HASH_DIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9]{25,}$").expect("valid hash pattern"));

/// What a directory looks like to the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirKind {
    /// Sole child is a hash-named directory; the walk continues inside it
    HashWrapper(PathBuf),
    /// Has a `bin` directory holding the runtime launcher
    Installation,
    /// Neither shape; skipped
    Unrecognized,
}

/// Pattern-driven locator for one runtime (e.g. "gradle")
#[derive(Debug, Clone)]
pub struct Locator {
    runtime_name: String,
    version_dir: Regex,
}

impl Locator {
    /// Build a locator for installation directories named `<runtime_name>-<version>-all|bin`
    ///
    /// Version components are single digits only (`8.5`, `7.6.1`); a component
    /// such as `10` does not match.
    #[allow(clippy::expect_used)] // The runtime name is escaped, so the pattern always compiles
    pub fn new(runtime_name: &str) -> Self {
        let pattern = format!(
            r"^{}-([0-9](?:\.[0-9])+)-(?:all|bin)$",
            regex::escape(runtime_name)
        );
        Self {
            runtime_name: runtime_name.to_string(),
            version_dir: Regex::new(&pattern).expect("escaped runtime name forms a valid pattern"),
        }
    }

    #[must_use]
    pub fn runtime_name(&self) -> &str {
        &self.runtime_name
    }

    /// Find installation directories under `root`, depth-first in file-name order
    ///
    /// Duplicates (an `-all` and a `-bin` of the same version) are all returned.
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        let children = match child_dirs(root) {
            Ok(children) => children,
            Err(e) => {
                report_unreadable(root, &e);
                return Vec::new();
            }
        };

        let mut found = Vec::new();
        for dir in children {
            match self.classify(&dir) {
                Ok(DirKind::HashWrapper(hash_dir)) => {
                    tracing::debug!("Descending into hash directory {}", hash_dir.display());
                    found.extend(self.discover_wrapped(&hash_dir));
                }
                Ok(DirKind::Installation) => {
                    tracing::debug!("Found installation {}", dir.display());
                    found.push(dir);
                }
                Ok(DirKind::Unrecognized) => {
                    tracing::trace!("Skipping {}", dir.display());
                }
                Err(e) => report_unreadable(&dir, &e),
            }
        }
        found
    }

    /// Classify one directory
    pub fn classify(&self, dir: &Path) -> io::Result<DirKind> {
        let children = child_dirs(dir)?;

        if let [only] = children.as_slice()
            && is_hash_dir_name(only)
        {
            return Ok(DirKind::HashWrapper(only.clone()));
        }

        if self.has_launcher(dir) {
            Ok(DirKind::Installation)
        } else {
            Ok(DirKind::Unrecognized)
        }
    }

    /// A hash directory is itself the installation when it carries the launcher
    fn discover_wrapped(&self, hash_dir: &Path) -> Vec<PathBuf> {
        if self.has_launcher(hash_dir) {
            vec![hash_dir.to_path_buf()]
        } else {
            self.discover(hash_dir)
        }
    }

    /// `dir/bin` exists and holds an entry starting with the runtime name
    fn has_launcher(&self, dir: &Path) -> bool {
        let bin = dir.join("bin");
        if !bin.is_dir() {
            return false;
        }

        match fs::read_dir(&bin) {
            Ok(entries) => entries.filter_map(Result::ok).any(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with(&self.runtime_name)
            }),
            Err(e) => {
                tracing::debug!("Cannot read {}: {e}", bin.display());
                false
            }
        }
    }

    /// Whether a single path segment names an installation directory
    #[must_use]
    pub fn is_version_dir_name(&self, name: &str) -> bool {
        self.version_dir.is_match(name)
    }

    /// Version of the innermost installation-shaped segment of `path`
    ///
    /// `.../gradle-8.5-all/<hash>/gradle-8.5` yields `"8.5"`; a path without
    /// such a segment yields `None`.
    #[must_use]
    pub fn version_from_path(&self, path: &Path) -> Option<String> {
        path.components().rev().find_map(|component| match component {
            Component::Normal(segment) => self
                .version_dir
                .captures(segment.to_str()?)
                .map(|caps| caps[1].to_string()),
            _ => None,
        })
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::new("gradle")
    }
}

/// Whether the final segment of `path` ends in 25+ lowercase alphanumerics
pub fn is_hash_dir_name(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| HASH_DIR.is_match(&name.to_string_lossy()))
}

/// Child directories (following symlinks), sorted by file name
fn child_dirs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(dirs)
}

fn report_unreadable(dir: &Path, err: &io::Error) {
    if err.kind() == io::ErrorKind::PermissionDenied {
        tracing::warn!(
            "Permission denied: Unable to list directories in '{}'.",
            dir.display()
        );
    } else {
        tracing::warn!("Unable to list directories in '{}': {err}", dir.display());
    }
}
