//! # Component Index Library
//!
//! Builds a local, queryable snapshot of many independently maintained
//! component libraries. A line-delimited JSON manifest lists each library's
//! id, repository URL and ref; this crate clones every repository, reads its
//! `pyproject.toml`, merges it with manifest overrides and writes one JSON
//! record per library plus a consolidated `index.json`.
//!
//! ## Quick Example
//!
//! ```no_run
//! use component_index::config::BuildConfig;
//! use component_index::pipeline;
//! use component_index::repository::RepositoryFetcher;
//!
//! let config = BuildConfig::new("xai_components_manifest.jsonl");
//! let mut fetcher = RepositoryFetcher::new(config.clone_root.clone());
//! let summary = pipeline::run(&config, &mut fetcher).unwrap();
//! println!("{} libraries indexed", summary.records);
//! ```
//!
//! ## Modules
//!
//! - **`manifest`**: lazy reader for the manifest, one `ManifestEntry` per line.
//! - **`repository`, `git`, `cache`**: shallow clones under a clone root,
//!   reuse of existing clones, one fetch per shared core `(url, ref)`.
//! - **`descriptor`**: `pyproject.toml` lookup and parsing.
//! - **`merge`**: per-library records, index entries and the override rule.
//! - **`index`**: ordered, atomically written index file.
//! - **`pipeline`**: runs the steps above for every entry.

pub mod cache;
pub mod config;
pub mod defaults;
pub mod descriptor;
pub mod error;
pub mod git;
pub mod index;
pub mod manifest;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod repository;
