//! # Manifest Reader
//!
//! The manifest is a line-delimited JSON file: one object per line, each
//! describing a component library to catalog. Blank lines are ignored.
//!
//! ```text
//! {"library_id": "CORE_LIB", "url": "https://github.com/org/core", "path": "libs/core", "origin": "core"}
//! {"library_id": "Gpt", "url": "https://github.com/org/gpt.git", "git_ref": "v2", "path": "xai_gpt"}
//! ```
//!
//! Entries are parsed lazily by [`ManifestReader`], in file order. A malformed
//! line or a missing `library_id`/`url` surfaces as an error carrying the
//! 1-based line number; callers abort on the first one. Override fields are
//! not type-checked and pass through to the index as written.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// One library listed in the manifest.
///
/// Override fields (`name` through `default_example_path`) keep whatever
/// JSON the manifest holds. `None` means the key is absent; a key set to
/// `null` is `Some(Value::Null)` and overrides with `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    pub library_id: String,
    pub url: String,
    /// Ref to fetch; the configured default when the line has none.
    pub git_ref: String,
    pub origin: Option<String>,
    /// Logical grouping path, and the library directory for core entries.
    pub path: Option<String>,
    pub name: Option<Value>,
    pub version: Option<Value>,
    pub description: Option<Value>,
    pub authors: Option<Value>,
    pub license: Option<Value>,
    pub readme: Option<Value>,
    pub repository: Option<Value>,
    pub keywords: Option<Value>,
    pub requirements: Option<Value>,
    pub default_example_path: Option<Value>,
}

impl ManifestEntry {
    /// Whether this entry lives in a shared core repository.
    pub fn is_core(&self, core_origin: &str) -> bool {
        self.origin.as_deref() == Some(core_origin)
    }

    /// Library id as used for file and directory names.
    pub fn key(&self) -> String {
        self.library_id.to_lowercase()
    }
}

/// Shape of a manifest line before required fields are checked.
#[derive(Debug, Deserialize)]
struct RawEntry {
    library_id: Option<String>,
    url: Option<String>,
    git_ref: Option<String>,
    origin: Option<String>,
    path: Option<String>,
    #[serde(default, deserialize_with = "present")]
    name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    version: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    description: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    authors: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    license: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    readme: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    repository: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    keywords: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    requirements: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    default_example_path: Option<Value>,
}

/// Marks a key that appears in the line, `null` included.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Parse a single manifest line.
///
/// `line` is only used for error messages.
pub fn parse_line(text: &str, line: usize, default_ref: &str) -> Result<ManifestEntry> {
    let raw: RawEntry = serde_json::from_str(text).map_err(|e| Error::ManifestParse {
        line,
        message: e.to_string(),
    })?;

    let library_id = required(raw.library_id, || format!("at line {}", line), "library_id")?;
    let url = required(raw.url, || format!("'{}'", library_id), "url")?;

    Ok(ManifestEntry {
        git_ref: raw.git_ref.unwrap_or_else(|| default_ref.to_string()),
        library_id,
        url,
        origin: raw.origin,
        path: raw.path,
        name: raw.name,
        version: raw.version,
        description: raw.description,
        authors: raw.authors,
        license: raw.license,
        readme: raw.readme,
        repository: raw.repository,
        keywords: raw.keywords,
        requirements: raw.requirements,
        default_example_path: raw.default_example_path,
    })
}

fn required(
    value: Option<String>,
    entry: impl FnOnce() -> String,
    field: &'static str,
) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::MissingField {
            entry: entry(),
            field,
        }),
    }
}

/// Lazy iterator over the entries of a manifest.
pub struct ManifestReader<R> {
    lines: Lines<R>,
    line: usize,
    default_ref: String,
}

impl ManifestReader<BufReader<File>> {
    /// Opens the manifest at `path`.
    pub fn open(path: &Path, default_ref: &str) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), default_ref))
    }
}

impl<R: BufRead> ManifestReader<R> {
    pub fn new(reader: R, default_ref: &str) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            default_ref: default_ref.to_string(),
        }
    }
}

impl<R: BufRead> Iterator for ManifestReader<R> {
    type Item = Result<ManifestEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;

            if text.trim().is_empty() {
                continue;
            }
            return Some(parse_line(&text, self.line, &self.default_ref));
        }
    }
}

/// Read every entry of the manifest at `path`, failing on the first bad line.
pub fn read_all(path: &Path, default_ref: &str) -> Result<Vec<ManifestEntry>> {
    ManifestReader::open(path, default_ref)?.collect()
}
