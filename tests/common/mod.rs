//! GVM Test Infrastructure
//!
//! Fixture trees that mimic a Gradle wrapper dists directory, plus helpers
//! for running the `gvm` binary against them.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

use gvm_lib::core::Layout;
use gvm_lib::runtimes::GradleManager;

/// A 25-character lowercase-alphanumeric wrapper hash
pub const HASH: &str = "4xbj2h0ysb5bpcb2wz9ehcbph";
pub const OTHER_HASH: &str = "dxy3o4v4ss4f1lzmhb2bpaihc";

/// Temporary dists root plus a slot for the active link
pub struct DistsFixture {
    temp: TempDir,
}

impl DistsFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp dir");
        fs::create_dir_all(temp.path().join("dists")).expect("create dists dir");
        fs::create_dir_all(temp.path().join("config")).expect("create config dir");
        Self { temp }
    }

    pub fn root(&self) -> PathBuf {
        self.temp.path().join("dists")
    }

    pub fn link(&self) -> PathBuf {
        self.temp.path().join("current")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.temp.path().join("config")
    }

    /// `root/<name>/bin/gradle`
    pub fn install(&self, name: &str) -> PathBuf {
        let home = self.root().join(name);
        make_home(&home);
        home
    }

    /// `root/<name>/<hash>/<home>/bin/gradle`, the real wrapper cache shape
    pub fn install_wrapped(&self, name: &str, hash: &str, home: &str) -> PathBuf {
        let home = self.root().join(name).join(hash).join(home);
        make_home(&home);
        home
    }

    pub fn manager(&self) -> GradleManager {
        GradleManager::new(Layout::new(self.root(), self.link()), "gradle")
    }

    /// `gvm` wired to this fixture, colors off, privilege check disabled
    pub fn gvm(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_gvm"));
        cmd.env("NO_COLOR", "1")
            .env("GVM_UNICODE", "0")
            .env("GVM_CONFIG_DIR", self.config_dir())
            .env("GVM_DISTS_DIR", self.root())
            .env("GVM_CURRENT_LINK", self.link())
            .env("GVM_REQUIRE_PRIVILEGES", "0")
            .env_remove("GVM_LOG");
        cmd
    }
}

/// Create `<home>/bin/gradle` alongside a `lib` directory
pub fn make_home(home: &Path) {
    fs::create_dir_all(home.join("bin")).expect("create bin");
    fs::create_dir_all(home.join("lib")).expect("create lib");
    fs::write(home.join("bin").join("gradle"), "#!/bin/sh\n").expect("write launcher");
}

/// Whether anything occupies `path` (including a dangling symlink)
pub fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Root ignores permission bits, so permission tests are meaningless there
#[cfg(unix)]
pub fn running_as_root() -> bool {
    rustix::process::geteuid().is_root()
}
