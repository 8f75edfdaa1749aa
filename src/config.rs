//! # Build Configuration
//!
//! `BuildConfig` gathers every path and policy value a build run needs. It is
//! constructed once (by the CLI, or directly by library users) and passed by
//! reference through the pipeline; nothing mutates it afterwards.

use std::path::{Path, PathBuf};

use crate::defaults;

/// Immutable settings for one build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Line-delimited JSON manifest listing the libraries.
    pub manifest: PathBuf,
    /// Destination of the consolidated index.
    pub output_index: PathBuf,
    /// Directory receiving per-library metadata files.
    pub metadata_dir: PathBuf,
    /// Directory holding fetched working copies.
    pub clone_root: PathBuf,
    /// Ref applied to entries without `git_ref`.
    pub default_ref: String,
    /// `origin` value that marks shared core entries.
    pub core_origin: String,
}

impl BuildConfig {
    /// Creates a configuration for `manifest` with every other value defaulted.
    pub fn new(manifest: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            ..Self::default()
        }
    }

    /// Places the index, metadata directory and clone root under `root`,
    /// keeping their default names.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        self.output_index = root.join(defaults::OUTPUT_INDEX);
        self.metadata_dir = root.join(defaults::METADATA_DIR);
        self.clone_root = root.join(defaults::CLONE_ROOT);
        self
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(defaults::MANIFEST_PATH),
            output_index: PathBuf::from(defaults::OUTPUT_INDEX),
            metadata_dir: PathBuf::from(defaults::METADATA_DIR),
            clone_root: PathBuf::from(defaults::CLONE_ROOT),
            default_ref: defaults::GIT_REF.to_string(),
            core_origin: defaults::CORE_ORIGIN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();
        assert_eq!(config.manifest, PathBuf::from("xai_components_manifest.jsonl"));
        assert_eq!(config.output_index, PathBuf::from("index.json"));
        assert_eq!(config.metadata_dir, PathBuf::from("metadata"));
        assert_eq!(config.clone_root, PathBuf::from(".clones"));
        assert_eq!(config.default_ref, "main");
        assert_eq!(config.core_origin, "core");
    }

    #[test]
    fn test_rooted_at() {
        let config = BuildConfig::new("libs.jsonl").rooted_at(Path::new("/work"));
        assert_eq!(config.manifest, PathBuf::from("libs.jsonl"));
        assert_eq!(config.output_index, PathBuf::from("/work/index.json"));
        assert_eq!(config.metadata_dir, PathBuf::from("/work/metadata"));
        assert_eq!(config.clone_root, PathBuf::from("/work/.clones"));
    }
}
