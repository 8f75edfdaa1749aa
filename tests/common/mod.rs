//! Shared test utilities for E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_manifest(&[r#"{"library_id": "A", ...}"#]);
//! fixture.command().arg("validate").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::Path;
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git_available, init_git_repo, read_json, TestFixture};
}

/// Whether a usable `git` binary is on PATH.
///
/// Tests that build real repositories return early when it is not.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Initialize a git repository at `dir` on branch `main` with `files`
/// committed, and return a `file://` URL that can be shallow-cloned.
#[allow(dead_code)]
pub fn init_git_repo(dir: &Path, files: &[(&str, &str)]) -> String {
    std::fs::create_dir_all(dir).unwrap();

    let git = |args: &[&str]| {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    };

    git(&["init", "-b", "main"]);
    git(&["config", "user.email", "test@example.com"]);
    git(&["config", "user.name", "Test User"]);
    git(&["config", "commit.gpgsign", "false"]);

    for (path, content) in files {
        let file = dir.join(path);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(file, content).unwrap();
    }
    if files.is_empty() {
        std::fs::write(dir.join("README.md"), "# empty\n").unwrap();
    }

    git(&["add", "."]);
    git(&["commit", "-m", "Initial commit"]);

    format!("file://{}", dir.display())
}

/// Parse a JSON file into a `serde_json::Value`.
#[allow(dead_code)]
pub fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&text).unwrap()
}

/// A temporary working directory holding a manifest.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `manifest.jsonl` with one line per element of `lines`.
    pub fn with_manifest<S: AsRef<str>>(self, lines: &[S]) -> Self {
        let lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
        let mut content = lines.join("\n");
        content.push('\n');
        self.temp_dir
            .child("manifest.jsonl")
            .write_str(&content)
            .expect("Failed to write manifest");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> std::path::PathBuf {
        self.path().join("manifest.jsonl")
    }

    /// Create a command running in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("component-index");
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("COMPONENT_INDEX_MANIFEST")
            .env_remove("COMPONENT_INDEX_OUTPUT")
            .env_remove("COMPONENT_INDEX_METADATA_DIR")
            .env_remove("COMPONENT_INDEX_CLONE_ROOT");
        cmd
    }

    /// `build` command with every path pointed into the fixture.
    #[allow(dead_code)]
    pub fn build_command(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("--color")
            .arg("never")
            .arg("build")
            .arg("--manifest")
            .arg(self.manifest_path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
