use std::fs;
use std::path::Path;
use std::process::Command;

use crate::defaults::GIT_MARKER;
use crate::error::Error;

/// Clone a repository at a specific ref using shallow clone
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Personal access tokens
/// - Any authentication configured in ~/.gitconfig
///
/// An empty `ref_name` clones the remote's default branch.
pub fn clone_shallow(url: &str, ref_name: &str, target_dir: &Path) -> Result<(), Error> {
    // Create parent directory if it doesn't exist
    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut command = Command::new("git");
    command.args(["clone", "--depth=1"]);
    if !ref_name.is_empty() {
        command.args(["--branch", ref_name]);
    }
    let output = command
        .arg(url)
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            r#ref: ref_name.to_string(),
            message: e.to_string(),
            hint: Some("Make sure git is installed and on PATH".to_string()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        let hint = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            Some(
                "Make sure you have access to the repository (SSH key, credential helper or token)"
                    .to_string(),
            )
        } else if stderr.contains("not found in upstream") {
            Some(format!("Check that '{}' is a branch or tag of {}", ref_name, url))
        } else if stderr.contains("already exists and is not an empty directory") {
            Some(format!(
                "Remove {} or point --clone-root elsewhere",
                target_dir.display()
            ))
        } else {
            None
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            r#ref: ref_name.to_string(),
            message: stderr,
            hint,
        });
    }

    Ok(())
}

/// Whether `dir` holds a git working copy.
///
/// Only the marker directory is checked; the checked-out ref is not.
pub fn has_git_marker(dir: &Path) -> bool {
    dir.join(GIT_MARKER).exists()
}

/// Repository name derived from its URL: the last path segment with any
/// extension removed (`https://host/org/xai-gpt.git` gives `xai-gpt`).
pub fn repo_stem(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed);
    match last.rfind('.') {
        Some(0) | None => last,
        Some(idx) => &last[..idx],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_repo_stem() {
        assert_eq!(repo_stem("https://github.com/org/xircuits.git"), "xircuits");
        assert_eq!(repo_stem("https://github.com/org/xircuits"), "xircuits");
        assert_eq!(repo_stem("https://github.com/org/xircuits/"), "xircuits");
        assert_eq!(repo_stem("git@github.com:org/xai-gpt.git"), "xai-gpt");
        assert_eq!(repo_stem("git@host:repo.git"), "repo");
    }

    #[test]
    fn test_repo_stem_keeps_inner_dots() {
        assert_eq!(repo_stem("https://host/org/a.b.git"), "a.b");
        assert_eq!(repo_stem("https://host/org/.hidden"), ".hidden");
    }

    #[test]
    fn test_has_git_marker() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!has_git_marker(temp_dir.path()));

        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        assert!(has_git_marker(temp_dir.path()));
    }

    #[test]
    fn test_has_git_marker_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!has_git_marker(&temp_dir.path().join("absent")));
    }

    // Cloning is exercised end-to-end in tests/cli_e2e_build.rs against
    // local repositories.
}
