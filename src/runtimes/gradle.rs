//! Gradle version manager
//!
//! Lists the Gradle distributions found under the wrapper dists root and
//! switches the active version by repointing one symlink at an
//! installation's `bin` directory.

use std::path::{Path, PathBuf};

use super::common::{self, sort_versions};
use super::locator::Locator;
use crate::cli::style;
use crate::core::{GvmError, Layout, Result};

/// One discovered installation and the version derived from its path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    pub path: PathBuf,
    pub version: String,
}

impl Installation {
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.path.join("bin")
    }
}

/// How `switch` should behave
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchOptions {
    /// Report what would happen without touching the filesystem
    pub dry_run: bool,
    /// Print the removal and creation steps
    pub verbose: bool,
    /// Create the link at a staging path and rename it into place (Unix only)
    pub atomic: bool,
}

/// A filesystem step performed on the active link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStep {
    /// The previous occupant of the link path was removed
    Removed(PathBuf),
    /// A link was created at `link` pointing at `target`
    Created { target: PathBuf, link: PathBuf },
    /// A staged link replaced the previous occupant in one rename
    Replaced { target: PathBuf, link: PathBuf },
}

/// Result of a switch (or of a dry run)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub version: String,
    pub installation: PathBuf,
    pub bin_dir: PathBuf,
    pub link: PathBuf,
    pub dry_run: bool,
    pub steps: Vec<LinkStep>,
}

pub struct GradleManager {
    layout: Layout,
    locator: Locator,
}

impl GradleManager {
    pub fn new(layout: Layout, runtime_name: &str) -> Self {
        Self {
            layout,
            locator: Locator::new(runtime_name),
        }
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// All installations in discovery order, skipping paths without a version
    pub fn installations(&self) -> Result<Vec<Installation>> {
        let root = &self.layout.dists_root;
        if !root.is_dir() {
            return Err(GvmError::DiscoveryRootMissing(root.clone()));
        }

        Ok(self
            .locator
            .discover(root)
            .into_iter()
            .filter_map(|path| {
                let version = self.locator.version_from_path(&path);
                if version.is_none() {
                    tracing::debug!("No version in {}, ignoring", path.display());
                }
                version.map(|version| Installation { path, version })
            })
            .collect())
    }

    /// Installed versions, deduplicated and sorted ascending
    pub fn list_installed(&self) -> Result<Vec<String>> {
        let installations = self.installations()?;
        Ok(sort_versions(installations.into_iter().map(|i| i.version)))
    }

    /// Version the active link currently points at
    #[must_use]
    pub fn current_version(&self) -> Option<String> {
        let target = common::read_link_target(&self.layout.current_link)?;
        let home = if target.file_name().is_some_and(|n| n == "bin") {
            target.parent()?
        } else {
            target.as_path()
        };
        self.locator.version_from_path(home)
    }

    /// Point the active link at the first installation of `version`
    ///
    /// The first match in discovery order wins when several installations
    /// (e.g. `-all` and `-bin`) share a version.
    pub fn switch(&self, version: &str, opts: SwitchOptions) -> Result<SwitchOutcome> {
        let requested = version;
        let version = common::normalize_version(requested);
        let installations = self.installations()?;

        let chosen = installations
            .into_iter()
            .find(|i| i.version == version)
            .ok_or_else(|| GvmError::VersionNotFound(requested.to_string()))?;

        let bin_dir = chosen.bin_dir();
        let link = self.layout.current_link.clone();
        let mut outcome = SwitchOutcome {
            version,
            installation: chosen.path,
            bin_dir,
            link,
            dry_run: opts.dry_run,
            steps: Vec::new(),
        };

        if opts.dry_run {
            println!(
                "{}",
                style::dry_run(&format!("Would switch to Gradle version: {}", outcome.version))
            );
            println!(
                "{}",
                style::dry_run(&format!(
                    "Would create symlink from {} to {}",
                    outcome.bin_dir.display(),
                    outcome.link.display()
                ))
            );
            return Ok(outcome);
        }

        if opts.atomic && cfg!(unix) {
            replace_link(&outcome.bin_dir, &outcome.link, opts.verbose, &mut outcome.steps)?;
        } else {
            swap_link(&outcome.bin_dir, &outcome.link, opts.verbose, &mut outcome.steps)?;
        }

        println!(
            "{}",
            style::success(&format!(
                "Switched to Gradle version: {}",
                style::version(&outcome.version)
            ))
        );
        Ok(outcome)
    }
}

/// Remove the old link, then create the new one
///
/// If creation fails after removal the link is left absent.
fn swap_link(target: &Path, link: &Path, verbose: bool, steps: &mut Vec<LinkStep>) -> Result<()> {
    let replaced = common::link_slot_occupied(link);
    if replaced {
        common::remove_link(link).map_err(|source| GvmError::LinkRemoval {
            path: link.to_path_buf(),
            source,
        })?;
        tracing::debug!("Removed existing symlink: {}", link.display());
        if verbose {
            println!(
                "{}",
                style::arrow(&format!("Removed existing symlink: {}", link.display()))
            );
        }
        steps.push(LinkStep::Removed(link.to_path_buf()));
    }

    common::create_dir_link(target, link).map_err(|source| GvmError::LinkCreation {
        from: target.to_path_buf(),
        to: link.to_path_buf(),
        replaced,
        source,
    })?;
    tracing::debug!("Created symlink from {} to {}", target.display(), link.display());
    if verbose {
        println!(
            "{}",
            style::arrow(&format!(
                "Created symlink from {} to {}",
                target.display(),
                link.display()
            ))
        );
    }
    steps.push(LinkStep::Created {
        target: target.to_path_buf(),
        link: link.to_path_buf(),
    });
    Ok(())
}

/// Create the link at a staging path and rename it over the old one
///
/// Readers of `link` see either the old or the new target, never a gap.
/// A real directory cannot be renamed over, so that case uses [`swap_link`].
fn replace_link(target: &Path, link: &Path, verbose: bool, steps: &mut Vec<LinkStep>) -> Result<()> {
    if std::fs::symlink_metadata(link).is_ok_and(|m| m.file_type().is_dir()) {
        tracing::debug!("{} is a directory, removing it before linking", link.display());
        return swap_link(target, link, verbose, steps);
    }

    let staging = staging_path(link);
    if common::link_slot_occupied(&staging) {
        common::remove_link(&staging).map_err(|source| GvmError::LinkRemoval {
            path: staging.clone(),
            source,
        })?;
    }

    common::create_dir_link(target, &staging).map_err(|source| GvmError::LinkCreation {
        from: target.to_path_buf(),
        to: staging.clone(),
        replaced: false,
        source,
    })?;

    if let Err(source) = std::fs::rename(&staging, link) {
        let _ = common::remove_link(&staging);
        return Err(GvmError::LinkCreation {
            from: target.to_path_buf(),
            to: link.to_path_buf(),
            replaced: false,
            source,
        });
    }

    tracing::debug!("Replaced symlink {} -> {}", link.display(), target.display());
    if verbose {
        println!(
            "{}",
            style::arrow(&format!(
                "Replaced symlink {} -> {}",
                link.display(),
                target.display()
            ))
        );
    }
    steps.push(LinkStep::Replaced {
        target: target.to_path_buf(),
        link: link.to_path_buf(),
    });
    Ok(())
}

fn staging_path(link: &Path) -> PathBuf {
    let mut name = link
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(format!(".gvm-{}", std::process::id()));
    link.with_file_name(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn install(dir: &Path) {
        fs::create_dir_all(dir.join("bin")).unwrap();
        fs::write(dir.join("bin").join("gradle"), "").unwrap();
    }

    fn manager(temp: &TempDir) -> GradleManager {
        let dists = temp.path().join("dists");
        fs::create_dir_all(&dists).unwrap();
        GradleManager::new(Layout::new(dists, temp.path().join("current")), "gradle")
    }

    #[test]
    fn test_list_installed_sorted_and_deduped() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);
        let dists = &mgr.layout().dists_root;
        install(&dists.join("gradle-8.5-bin"));
        install(&dists.join("gradle-8.5-all"));
        install(&dists.join("gradle-7.6-bin"));
        install(&dists.join("gradle-6.9.4-all"));

        assert_eq!(mgr.list_installed().unwrap(), vec!["6.9.4", "7.6", "8.5"]);
    }

    #[test]
    fn test_list_missing_root() {
        let temp = TempDir::new().unwrap();
        let mgr = GradleManager::new(
            Layout::new(temp.path().join("nope"), temp.path().join("current")),
            "gradle",
        );
        assert!(matches!(
            mgr.list_installed(),
            Err(GvmError::DiscoveryRootMissing(_))
        ));
    }

    #[test]
    fn test_installations_skip_unversioned_paths() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);
        install(&mgr.layout().dists_root.join("gradle-nightly"));
        install(&mgr.layout().dists_root.join("gradle-8.5-bin"));

        let found = mgr.installations().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].version, "8.5");
    }

    #[test]
    fn test_switch_not_found_mutates_nothing() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);
        install(&mgr.layout().dists_root.join("gradle-8.5-bin"));
        fs::write(temp.path().join("current"), "sentinel").unwrap();

        let err = mgr.switch("99.99", SwitchOptions::default()).unwrap_err();
        assert!(matches!(err, GvmError::VersionNotFound(v) if v == "99.99"));
        assert_eq!(
            fs::read_to_string(temp.path().join("current")).unwrap(),
            "sentinel"
        );
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);
        let home = mgr.layout().dists_root.join("gradle-8.5-bin");
        install(&home);

        let outcome = mgr
            .switch("8.5", SwitchOptions { dry_run: true, ..SwitchOptions::default() })
            .unwrap();

        assert!(outcome.dry_run);
        assert!(outcome.steps.is_empty());
        assert_eq!(outcome.bin_dir, home.join("bin"));
        assert!(!common::link_slot_occupied(&temp.path().join("current")));
    }

    #[test]
    #[cfg(unix)]
    fn test_switch_creates_link_to_bin() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);
        let home = mgr.layout().dists_root.join("gradle-8.5-bin");
        install(&home);

        let outcome = mgr.switch("v8.5", SwitchOptions::default()).unwrap();

        assert_eq!(outcome.version, "8.5");
        assert_eq!(
            outcome.steps,
            vec![LinkStep::Created {
                target: home.join("bin"),
                link: temp.path().join("current"),
            }]
        );
        assert_eq!(
            fs::read_link(temp.path().join("current")).unwrap(),
            home.join("bin")
        );
        assert_eq!(mgr.current_version(), Some("8.5".to_string()));
    }

    #[test]
    #[cfg(unix)]
    fn test_switch_first_discovered_wins() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);
        install(&mgr.layout().dists_root.join("gradle-8.5-bin"));
        install(&mgr.layout().dists_root.join("gradle-8.5-all"));

        let outcome = mgr.switch("8.5", SwitchOptions::default()).unwrap();
        assert_eq!(
            outcome.installation,
            mgr.layout().dists_root.join("gradle-8.5-all")
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_switch_twice_removes_previous_link() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);
        let home = mgr.layout().dists_root.join("gradle-7.6-bin");
        install(&home);

        mgr.switch("7.6", SwitchOptions::default()).unwrap();
        let second = mgr.switch("7.6", SwitchOptions::default()).unwrap();

        assert_eq!(second.steps[0], LinkStep::Removed(temp.path().join("current")));
        assert_eq!(
            fs::read_link(temp.path().join("current")).unwrap(),
            home.join("bin")
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_atomic_switch_replaces_in_place() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);
        let old = mgr.layout().dists_root.join("gradle-7.6-bin");
        let new = mgr.layout().dists_root.join("gradle-8.5-bin");
        install(&old);
        install(&new);

        mgr.switch("7.6", SwitchOptions::default()).unwrap();
        let outcome = mgr
            .switch("8.5", SwitchOptions { atomic: true, ..SwitchOptions::default() })
            .unwrap();

        assert!(matches!(outcome.steps.as_slice(), [LinkStep::Replaced { .. }]));
        assert_eq!(
            fs::read_link(temp.path().join("current")).unwrap(),
            new.join("bin")
        );
        assert!(!common::link_slot_occupied(&staging_path(&temp.path().join("current"))));
    }

    #[test]
    #[cfg(unix)]
    fn test_atomic_switch_over_empty_directory() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);
        let home = mgr.layout().dists_root.join("gradle-7.6-bin");
        install(&home);
        let link = temp.path().join("current");
        fs::create_dir(&link).unwrap();

        let outcome = mgr
            .switch("7.6", SwitchOptions { atomic: true, ..SwitchOptions::default() })
            .unwrap();

        assert_eq!(
            outcome.steps,
            vec![
                LinkStep::Removed(link.clone()),
                LinkStep::Created {
                    target: home.join("bin"),
                    link: link.clone(),
                },
            ]
        );
        assert_eq!(fs::read_link(&link).unwrap(), home.join("bin"));
    }

    #[test]
    #[cfg(unix)]
    fn test_atomic_switch_keeps_non_empty_directory() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);
        install(&mgr.layout().dists_root.join("gradle-7.6-bin"));
        let link = temp.path().join("current");
        fs::create_dir(&link).unwrap();
        fs::write(link.join("keep"), "").unwrap();

        let err = mgr
            .switch("7.6", SwitchOptions { atomic: true, ..SwitchOptions::default() })
            .unwrap_err();
        assert!(matches!(err, GvmError::LinkRemoval { .. }));
        assert!(link.join("keep").exists());
    }

    #[test]
    fn test_not_found_reports_requested_text() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);
        install(&mgr.layout().dists_root.join("gradle-8.5-bin"));

        let err = mgr.switch("v99", SwitchOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Gradle version 'v99' does not exist.");
    }

    #[test]
    #[cfg(unix)]
    fn test_creation_failure_leaves_link_absent() {
        let temp = TempDir::new().unwrap();
        let dists = temp.path().join("dists");
        install(&dists.join("gradle-8.5-bin"));
        // Parent of the link does not exist, so creation fails after removal is skipped
        let mgr = GradleManager::new(
            Layout::new(&dists, temp.path().join("missing").join("current")),
            "gradle",
        );

        let err = mgr.switch("8.5", SwitchOptions::default()).unwrap_err();
        assert!(matches!(err, GvmError::LinkCreation { .. }));
        assert!(!err.left_link_missing());
        assert!(!common::link_slot_occupied(&temp.path().join("missing").join("current")));
    }

    #[test]
    fn test_removal_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);
        install(&mgr.layout().dists_root.join("gradle-8.5-bin"));
        let occupied = temp.path().join("current");
        fs::create_dir(&occupied).unwrap();
        fs::write(occupied.join("keep"), "").unwrap();

        let err = mgr.switch("8.5", SwitchOptions::default()).unwrap_err();
        assert!(matches!(err, GvmError::LinkRemoval { .. }));
        assert!(occupied.join("keep").exists());
    }

    #[test]
    fn test_current_version_absent() {
        let temp = TempDir::new().unwrap();
        assert_eq!(manager(&temp).current_version(), None);
    }
}
