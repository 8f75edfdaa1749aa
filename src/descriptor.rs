//! # Project Descriptor Extraction
//!
//! Each fetched repository describes itself in a `pyproject.toml`. This module
//! locates that file, reads its `[project]` table and the optional
//! `[tool.xircuits]` table, and resolves the library's default example.
//!
//! Core libraries live in a subdirectory of a shared repository and must be
//! well-formed: a missing directory, descriptor or default example aborts the
//! run. Independently hosted libraries are looked up at the repository root
//! and a missing descriptor only produces a warning; every field then takes
//! its empty value.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::defaults::DESCRIPTOR_FILE;
use crate::error::{Error, Result};
use crate::manifest::ManifestEntry;

/// The `[tool.xircuits]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct XircuitsConfig {
    pub default_example_path: Option<String>,
}

/// Fields of a descriptor's `[project]` table, plus the tool block.
///
/// Lists are empty and scalars are `None` when the file omits them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectDescriptor {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    /// Usually `{name, email}` tables.
    pub authors: Vec<Value>,
    /// A string or a `{text}` / `{file}` table.
    pub license: Option<Value>,
    /// A path or a `{file, content-type}` table.
    pub readme: Option<Value>,
    pub repository: Option<String>,
    pub keywords: Vec<String>,
    pub dependencies: Vec<String>,
    #[serde(skip)]
    pub xircuits: XircuitsConfig,
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    project: Option<ProjectDescriptor>,
    tool: Option<ToolSection>,
}

#[derive(Debug, Default, Deserialize)]
struct ToolSection {
    xircuits: Option<XircuitsConfig>,
}

impl ProjectDescriptor {
    /// Parse descriptor text; `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let parsed: PyProject = toml::from_str(content).map_err(|e| Error::DescriptorParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut descriptor = parsed.project.unwrap_or_default();
        descriptor.xircuits = parsed
            .tool
            .and_then(|tool| tool.xircuits)
            .unwrap_or_default();
        Ok(descriptor)
    }

    /// Read and parse the descriptor at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
    }
}

/// Result of looking up an entry's descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub descriptor: ProjectDescriptor,
    /// A string for core libraries; whatever the manifest holds, or the
    /// tool block's value, for the rest.
    pub default_example_path: Value,
    /// False when a non-core library had no descriptor file.
    pub found: bool,
}

/// Locate, parse and resolve the descriptor for `entry` inside `repo_root`.
pub fn extract(entry: &ManifestEntry, repo_root: &Path, core_origin: &str) -> Result<Extraction> {
    if entry.is_core(core_origin) {
        extract_core(entry, repo_root)
    } else {
        extract_independent(entry, repo_root)
    }
}

fn extract_core(entry: &ManifestEntry, repo_root: &Path) -> Result<Extraction> {
    let lib_path = non_empty(entry.path.as_deref()).ok_or_else(|| Error::CorePathMissing {
        library_id: entry.library_id.clone(),
    })?;

    let lib_root = repo_root.join(lib_path);
    if !lib_root.is_dir() {
        return Err(Error::CoreLibraryNotFound {
            library_id: entry.library_id.clone(),
            path: lib_root,
        });
    }

    let descriptor_path = lib_root.join(DESCRIPTOR_FILE);
    if !descriptor_path.is_file() {
        return Err(Error::CoreDescriptorNotFound {
            library_id: entry.library_id.clone(),
            path: descriptor_path,
        });
    }

    let descriptor = ProjectDescriptor::load(&descriptor_path)?;
    // Empty manifest values fall through to the tool block.
    let default_example_path = entry
        .default_example_path
        .clone()
        .filter(is_set)
        .or_else(|| {
            non_empty(descriptor.xircuits.default_example_path.as_deref()).map(Value::from)
        })
        .ok_or_else(|| Error::DefaultExamplePathMissing {
            library_id: entry.library_id.clone(),
        })?;

    Ok(Extraction {
        descriptor,
        default_example_path,
        found: true,
    })
}

fn extract_independent(entry: &ManifestEntry, repo_root: &Path) -> Result<Extraction> {
    let descriptor_path = repo_root.join(DESCRIPTOR_FILE);

    let (descriptor, found) = if descriptor_path.is_file() {
        (ProjectDescriptor::load(&descriptor_path)?, true)
    } else {
        warn!(
            "{}: {} not found at repo root; using nulls.",
            entry.library_id, DESCRIPTOR_FILE
        );
        (ProjectDescriptor::default(), false)
    };

    // A manifest key wins even when it is null.
    let default_example_path = match &entry.default_example_path {
        Some(value) => value.clone(),
        None => Value::from(descriptor.xircuits.default_example_path.clone()),
    };
    debug!(
        "{}: default_example_path resolved to {:?}",
        entry.library_id, default_example_path
    );

    Ok(Extraction {
        descriptor,
        default_example_path,
        found,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// False for `null`, `false`, zero and empty strings, arrays or objects.
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
