//! # Build Pipeline
//!
//! Runs the whole catalog build, one manifest entry at a time:
//!
//! 1.  **Read**: stream entries from the manifest.
//! 2.  **Fetch**: materialize the entry's repository under the clone root.
//! 3.  **Extract**: read the project descriptor from the fetched tree.
//! 4.  **Merge**: write the per-library record and collect an index entry.
//! 5.  **Index**: after the last entry, write the consolidated index.
//!
//! The first error aborts the run. Records written before the failure stay
//! on disk and no index is produced.

use std::fs;

use log::{debug, info};

use crate::config::BuildConfig;
use crate::descriptor;
use crate::error::Result;
use crate::index::IndexBuilder;
use crate::manifest::ManifestReader;
use crate::merge;
use crate::repository::{FetchOutcome, RepositoryFetcher};

/// Counters describing a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Per-library records written, which is also the index length.
    pub records: usize,
    /// Fresh clones made.
    pub cloned: usize,
    /// Entries served by a clone left by an earlier run.
    pub cache_hits: usize,
    /// Core entries that reused a clone made earlier in this run.
    pub shared: usize,
    /// Non-core entries without a descriptor file.
    pub warnings: usize,
}

/// Build every per-library record and the index described by `config`.
///
/// Clones go under the fetcher's clone root, which is created here;
/// `config.clone_root` is only what the CLI builds the fetcher from.
pub fn run(config: &BuildConfig, fetcher: &mut RepositoryFetcher) -> Result<BuildSummary> {
    fs::create_dir_all(&config.metadata_dir)?;
    fs::create_dir_all(fetcher.clone_root())?;

    let mut summary = BuildSummary::default();
    let mut index = IndexBuilder::new();

    for entry in ManifestReader::open(&config.manifest, &config.default_ref)? {
        let entry = entry?;

        let fetched = fetcher.fetch(&entry, &config.core_origin)?;
        debug!(
            "{}: {}@{} at {} ({:?})",
            entry.library_id,
            fetched.url,
            fetched.git_ref,
            fetched.path.display(),
            fetched.outcome
        );
        match fetched.outcome {
            FetchOutcome::Cloned => summary.cloned += 1,
            FetchOutcome::CacheHit => summary.cache_hits += 1,
            FetchOutcome::Shared => summary.shared += 1,
        }

        let extraction = descriptor::extract(&entry, &fetched.path, &config.core_origin)?;
        if !extraction.found {
            summary.warnings += 1;
        }

        let (_, index_entry) = merge::merge_and_write(&entry, &extraction, &config.metadata_dir)?;
        index.push(index_entry);
    }

    summary.records = index.finish(&config.output_index)?;
    info!(
        "Generated {} metadata files in '{}' and wrote '{}'",
        summary.records,
        config.metadata_dir.display(),
        config.output_index.display()
    );
    Ok(summary)
}
