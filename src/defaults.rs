//! Default values for component-index configuration.
//!
//! This module provides centralized default values used by the CLI and the
//! library, ensuring consistency and avoiding duplication.

/// Manifest read when `--manifest` is not given.
pub const MANIFEST_PATH: &str = "xai_components_manifest.jsonl";

/// Consolidated index written when `--output-index` is not given.
pub const OUTPUT_INDEX: &str = "index.json";

/// Directory receiving one JSON file per library.
pub const METADATA_DIR: &str = "metadata";

/// Directory holding one working copy per fetch destination.
pub const CLONE_ROOT: &str = ".clones";

/// Ref used for entries that do not set `git_ref`.
pub const GIT_REF: &str = "main";

/// `origin` value marking entries that live in a shared core repository.
pub const CORE_ORIGIN: &str = "core";

/// Project descriptor looked up in every fetched repository.
pub const DESCRIPTOR_FILE: &str = "pyproject.toml";

/// Version-control marker whose presence counts as a cache hit.
pub const GIT_MARKER: &str = ".git";
