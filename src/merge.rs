//! # Metadata Merging
//!
//! Combines a manifest entry with the descriptor extracted from its
//! repository into the two output shapes:
//!
//! - **`MetadataRecord`**, written to `<metadata_dir>/<library_id>.json`.
//!   Descriptor fields are used as-is; identity fields (`library_id`, `path`,
//!   `url`, `git_ref`, `origin`) and the resolved `default_example_path` come
//!   from the manifest.
//! - **`IndexEntry`**, one element of the consolidated index. Here a key
//!   present in the manifest overrides the record's value, even when it is
//!   `null` or not the type the descriptor would use, so a manifest author
//!   can correct a field without touching the upstream repository.
//!
//! Both precedence rules go through [`resolve`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::Extraction;
use crate::error::{Error, Result};
use crate::manifest::ManifestEntry;

/// Per-library metadata file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub library_id: String,
    pub path: String,
    pub url: String,
    pub git_ref: String,
    pub origin: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub authors: Vec<Value>,
    pub license: Option<Value>,
    pub readme: Option<Value>,
    pub repository: Option<String>,
    pub keywords: Vec<String>,
    pub requirements: Vec<String>,
    pub default_example_path: Value,
}

/// One element of the consolidated index.
///
/// Fields a manifest can override are free-form JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub library_id: String,
    pub name: Value,
    pub path: String,
    /// Location of the library's `MetadataRecord` file.
    pub metadata: String,
    pub version: Value,
    pub description: Value,
    pub authors: Value,
    pub license: Value,
    pub readme: Value,
    pub repository: Value,
    pub keywords: Value,
    pub requirements: Value,
    pub url: String,
    pub git_ref: String,
    pub origin: Option<String>,
    pub default_example_path: Value,
}

/// Two-tier precedence: the override when present, otherwise the fallback.
///
/// For manifest overrides `Some(Value::Null)` is present and wins.
pub fn resolve<T>(override_value: Option<T>, fallback: T) -> T {
    override_value.unwrap_or(fallback)
}

/// [`resolve`] against a typed record value.
fn overlay(override_value: &Option<Value>, fallback: impl Into<Value>) -> Value {
    resolve(override_value.clone(), fallback.into())
}

/// File name of a library's metadata record.
pub fn metadata_file_name(library_id: &str) -> String {
    format!("{}.json", library_id.to_lowercase())
}

/// Build the per-library record for `entry`.
pub fn build_record(entry: &ManifestEntry, extraction: &Extraction) -> Result<MetadataRecord> {
    let path = entry.path.clone().ok_or_else(|| Error::MissingField {
        entry: format!("'{}'", entry.library_id),
        field: "path",
    })?;
    let descriptor = &extraction.descriptor;

    Ok(MetadataRecord {
        library_id: entry.library_id.clone(),
        path,
        url: entry.url.clone(),
        git_ref: entry.git_ref.clone(),
        origin: entry.origin.clone(),
        version: descriptor.version.clone(),
        description: descriptor.description.clone(),
        authors: descriptor.authors.clone(),
        license: descriptor.license.clone(),
        readme: descriptor.readme.clone(),
        repository: descriptor.repository.clone(),
        keywords: descriptor.keywords.clone(),
        requirements: descriptor.dependencies.clone(),
        default_example_path: extraction.default_example_path.clone(),
    })
}

/// Build the index entry for `entry`, whose record was written to `metadata_path`.
pub fn build_index_entry(
    entry: &ManifestEntry,
    extraction: &Extraction,
    record: &MetadataRecord,
    metadata_path: &Path,
) -> IndexEntry {
    IndexEntry {
        library_id: entry.library_id.clone(),
        name: overlay(&entry.name, extraction.descriptor.name.clone()),
        path: record.path.clone(),
        metadata: metadata_path.to_string_lossy().replace('\\', "/"),
        version: overlay(&entry.version, record.version.clone()),
        description: overlay(&entry.description, record.description.clone()),
        authors: overlay(&entry.authors, record.authors.clone()),
        license: overlay(&entry.license, record.license.clone()),
        readme: overlay(&entry.readme, record.readme.clone()),
        repository: overlay(&entry.repository, record.repository.clone()),
        keywords: overlay(&entry.keywords, record.keywords.clone()),
        requirements: overlay(&entry.requirements, record.requirements.clone()),
        url: record.url.clone(),
        git_ref: record.git_ref.clone(),
        origin: record.origin.clone(),
        default_example_path: record.default_example_path.clone(),
    }
}

/// Merge `entry` with its extraction, write the record under `metadata_dir`
/// and return the record together with its index entry.
pub fn merge_and_write(
    entry: &ManifestEntry,
    extraction: &Extraction,
    metadata_dir: &Path,
) -> Result<(MetadataRecord, IndexEntry)> {
    let record = build_record(entry, extraction)?;
    let written = write_record(metadata_dir, &record)?;
    let index_entry = build_index_entry(entry, extraction, &record, &written);
    Ok((record, index_entry))
}

/// Write `record` as pretty JSON, replacing any existing file.
pub fn write_record(metadata_dir: &Path, record: &MetadataRecord) -> Result<PathBuf> {
    fs::create_dir_all(metadata_dir)?;
    let out_file = metadata_dir.join(metadata_file_name(&record.library_id));
    let json = serde_json::to_vec_pretty(record)?;
    fs::write(&out_file, json)?;
    Ok(out_file)
}
