//! In-process tracking of shared core clones

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Cache key combining URL and reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub url: String,
    pub r#ref: String,
}

impl CacheKey {
    pub fn new(url: &str, r#ref: &str) -> Self {
        Self {
            url: url.to_string(),
            r#ref: r#ref.to_string(),
        }
    }
}

/// Maps each core `(url, ref)` to the destination it was fetched into.
///
/// Lives for a single run. A key is fetched at most once: later lookups get
/// the recorded destination without calling the fetcher again.
#[derive(Debug, Default)]
pub struct CoreCloneCache {
    destinations: HashMap<CacheKey, PathBuf>,
}

impl CoreCloneCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the destination for `key`, or run `fetch` and record its result.
    ///
    /// Returns the destination and whether `fetch` ran. A failed fetch is
    /// not recorded.
    pub fn get_or_fetch<F>(&mut self, key: CacheKey, fetch: F) -> Result<(PathBuf, bool)>
    where
        F: FnOnce() -> Result<PathBuf>,
    {
        if let Some(dest) = self.destinations.get(&key) {
            return Ok((dest.clone(), false));
        }

        let dest = fetch()?;
        self.destinations.insert(key, dest.clone());
        Ok((dest, true))
    }

    /// Get a recorded destination without fetching
    pub fn get(&self, key: &CacheKey) -> Option<&Path> {
        self.destinations.get(key).map(PathBuf::as_path)
    }

    /// Get the number of recorded keys
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}
