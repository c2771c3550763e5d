//! Shared test utilities for E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = PatchFixture::new();
//! let repo = fixture.init_repo("svc-a");
//! let patches = fixture.create_patches("svc-a", 2);
//! ```

use assert_fs::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git, PatchFixture};
}

/// Name of the configuration file every fixture writes.
pub const CONFIG_FILE: &str = "patches.json";

/// Run git in `dir` and return its stdout, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A temporary workspace with `repos/`, `patches/` and a configuration file.
pub struct PatchFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl PatchFixture {
    /// Create a new fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn repo_path(&self, name: &str) -> PathBuf {
        self.path().join("repos").join(name)
    }

    pub fn patch_root(&self) -> PathBuf {
        self.path().join("patches")
    }

    /// Write `patches.json` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child(CONFIG_FILE)
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Write a config with `repos/` and `patches/` as roots.
    pub fn with_entries(self, entries: &[(&str, Vec<String>)]) -> Self {
        let patch_list: Vec<serde_json::Value> = entries
            .iter()
            .map(|(target, patches)| serde_json::json!({ "target": target, "patch": patches }))
            .collect();
        let config = serde_json::json!({
            "target_root": "repos",
            "patch_root": "patches",
            "patch_list": patch_list,
        });
        self.with_config(&config.to_string())
    }

    /// Create an empty directory (not a repository) under `repos/`.
    pub fn plain_dir(&self, name: &str) -> PathBuf {
        let dir = self.repo_path(name);
        fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    /// Create `repos/<name>` as a git repository with one base commit.
    pub fn init_repo(&self, name: &str) -> PathBuf {
        let dir = self.plain_dir(name);
        git(&dir, &["init", "-q"]);
        git(&dir, &["config", "user.name", "Patch Tester"]);
        git(&dir, &["config", "user.email", "tester@example.com"]);
        git(&dir, &["config", "commit.gpgsign", "false"]);
        fs::write(dir.join("README.md"), "base\n").unwrap();
        git(&dir, &["add", "README.md"]);
        git(&dir, &["commit", "-q", "-m", "base"]);
        dir
    }

    /// Commit `count` changes to `repo`, export them as
    /// `patches/<repo>/000N.patch` and rewind the repository again.
    ///
    /// Returns the patch paths relative to the patch root.
    pub fn create_patches(&self, repo: &str, count: usize) -> Vec<String> {
        let dir = self.repo_path(repo);
        let patch_dir = self.patch_root().join(repo);
        fs::create_dir_all(&patch_dir).unwrap();

        for i in 1..=count {
            let file = format!("change-{}.txt", i);
            fs::write(dir.join(&file), format!("change {}\n", i)).unwrap();
            git(&dir, &["add", &file]);
            git(&dir, &["commit", "-q", "-m", &format!("change {}", i)]);
        }

        let mut patches = Vec::new();
        for i in 1..=count {
            let rev = format!("HEAD~{}", count - i);
            let patch = git(&dir, &["format-patch", "-1", &rev, "--stdout"]);
            let name = format!("{:04}.patch", i);
            fs::write(patch_dir.join(&name), patch).unwrap();
            patches.push(format!("{}/{}", repo, name));
        }

        git(&dir, &["reset", "-q", "--hard", &format!("HEAD~{}", count)]);
        patches
    }

    /// Write a patch that can never apply and return its relative path.
    pub fn broken_patch(&self, repo: &str, name: &str) -> String {
        let patch_dir = self.patch_root().join(repo);
        fs::create_dir_all(&patch_dir).unwrap();
        fs::write(
            patch_dir.join(name),
            "From: Nobody <nobody@example.com>\n\
             Subject: [PATCH] broken\n\
             \n\
             ---\n\
             diff --git a/missing.txt b/missing.txt\n\
             --- a/missing.txt\n\
             +++ b/missing.txt\n\
             @@ -1 +1 @@\n\
             -not there\n\
             +still not there\n",
        )
        .unwrap();
        format!("{}/{}", repo, name)
    }

    pub fn commit_count(&self, repo: &str) -> usize {
        git(&self.repo_path(repo), &["rev-list", "--count", "HEAD"])
            .trim()
            .parse()
            .expect("rev-list --count prints a number")
    }

    /// `mrpatch patches.json` run from the fixture directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("mrpatch");
        cmd.current_dir(self.path())
            .env_remove("MRPATCH_TARGET_ROOT")
            .env_remove("MRPATCH_PATCH_ROOT")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg(CONFIG_FILE);
        cmd
    }
}

impl Default for PatchFixture {
    fn default() -> Self {
        Self::new()
    }
}
