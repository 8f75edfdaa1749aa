//! # Repository Fetching
//!
//! This module provides the `RepositoryFetcher`, which turns a manifest entry
//! into a local working copy under the clone root. It decides where each
//! entry's clone lives, reuses existing clones, and makes sure a shared core
//! repository is fetched at most once per run.
//!
//! ## Destinations
//!
//! - **Core entries** share one clone per `(url, ref)` pair, stored at
//!   `<clone_root>/<repo-stem>-<ref>` (lower-cased).
//! - **All other entries** get their own clone at
//!   `<clone_root>/<library_id>` (lower-cased), even when two entries point
//!   at the same URL.
//!
//! ## Reuse
//!
//! A destination that already contains a `.git` directory is treated as a
//! valid clone and is not fetched again. The checked-out ref is not
//! verified, so a clone left behind by a run with a different ref is served
//! as-is.
//!
//! Git access goes through the `GitOperations` trait so tests can substitute
//! a fake that materializes repositories without touching the network.

use std::path::{Path, PathBuf};

use log::info;

use crate::cache::{CacheKey, CoreCloneCache};
use crate::error::Result;
use crate::git;
use crate::manifest::ManifestEntry;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Clones a repository at a specific Git reference (branch or tag).
    ///
    /// This is expected to be a shallow clone to optimize for speed and disk
    /// space.
    fn clone_shallow(&self, url: &str, ref_name: &str, target_dir: &Path) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real Git operations.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn clone_shallow(&self, url: &str, ref_name: &str, target_dir: &Path) -> Result<()> {
        git::clone_shallow(url, ref_name, target_dir)
    }
}

/// How a fetch request was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A fresh clone was made.
    Cloned,
    /// The destination already held a clone from an earlier run.
    CacheHit,
    /// Another core entry in this run already fetched the same `(url, ref)`.
    Shared,
}

/// A working copy of a repository on local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedRepository {
    pub path: PathBuf,
    pub url: String,
    pub git_ref: String,
    pub outcome: FetchOutcome,
}

/// Destination of a shared core clone.
pub fn core_destination(clone_root: &Path, url: &str, ref_name: &str) -> PathBuf {
    let dir = format!("{}-{}", git::repo_stem(url), ref_name.replace('/', "-"));
    clone_root.join(dir.to_lowercase())
}

/// Destination of a library's own clone.
pub fn library_destination(clone_root: &Path, library_id: &str) -> PathBuf {
    clone_root.join(library_id.to_lowercase())
}

/// Ensure `dest` holds a clone of `url`, cloning only when no `.git` is there.
fn ensure_clone(
    git_ops: &dyn GitOperations,
    url: &str,
    ref_name: &str,
    dest: &Path,
) -> Result<FetchOutcome> {
    if git::has_git_marker(dest) {
        info!("Using cached clone: {}", dest.display());
        return Ok(FetchOutcome::CacheHit);
    }

    info!("Cloning {}@{} into {}", url, ref_name, dest.display());
    git_ops.clone_shallow(url, ref_name, dest)?;
    Ok(FetchOutcome::Cloned)
}

/// Materializes manifest entries under a clone root.
pub struct RepositoryFetcher {
    clone_root: PathBuf,
    git_ops: Box<dyn GitOperations>,
    core_clones: CoreCloneCache,
}

impl RepositoryFetcher {
    /// Creates a fetcher that clones with the system `git` into `clone_root`.
    pub fn new(clone_root: PathBuf) -> Self {
        Self::with_operations(clone_root, Box::new(DefaultGitOperations))
    }

    /// Creates a fetcher with a custom `GitOperations` implementation.
    pub fn with_operations(clone_root: PathBuf, git_ops: Box<dyn GitOperations>) -> Self {
        Self {
            clone_root,
            git_ops,
            core_clones: CoreCloneCache::new(),
        }
    }

    pub fn clone_root(&self) -> &Path {
        &self.clone_root
    }

    /// Fetch the repository behind `entry`.
    ///
    /// Entries whose origin equals `core_origin` are deduplicated by
    /// `(url, git_ref)`; the rest are fetched into their own directory.
    pub fn fetch(&mut self, entry: &ManifestEntry, core_origin: &str) -> Result<FetchedRepository> {
        let (path, outcome) = if entry.is_core(core_origin) {
            self.fetch_core(&entry.url, &entry.git_ref)?
        } else {
            let dest = library_destination(&self.clone_root, &entry.library_id);
            let outcome = ensure_clone(self.git_ops.as_ref(), &entry.url, &entry.git_ref, &dest)?;
            (dest, outcome)
        };

        Ok(FetchedRepository {
            path,
            url: entry.url.clone(),
            git_ref: entry.git_ref.clone(),
            outcome,
        })
    }

    fn fetch_core(&mut self, url: &str, ref_name: &str) -> Result<(PathBuf, FetchOutcome)> {
        let Self {
            clone_root,
            git_ops,
            core_clones,
        } = self;

        let mut outcome = FetchOutcome::Shared;
        let (dest, _) = core_clones.get_or_fetch(CacheKey::new(url, ref_name), || {
            let dest = core_destination(clone_root, url, ref_name);
            outcome = ensure_clone(&**git_ops, url, ref_name, &dest)?;
            Ok(dest)
        })?;

        Ok((dest, outcome))
    }
}
