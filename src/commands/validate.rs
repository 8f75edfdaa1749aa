//! # Validate Command Implementation
//!
//! Checks a manifest without cloning anything:
//!
//! - every line parses and carries `library_id` and `url`,
//! - every entry has the `path` the build needs (non-empty for core entries),
//! - no two entries map to the same metadata file (ids are compared
//!   lower-cased, since files are named that way).
//!
//! Duplicate ids are warnings unless `--strict` is given; everything else is
//! an error.

use anyhow::Result;
use clap::Args;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;

use component_index::defaults;
use component_index::manifest::{self, ManifestEntry};
use component_index::output::{emoji, OutputConfig};

/// Validate a component manifest
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Line-delimited JSON manifest to check
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "COMPONENT_INDEX_MANIFEST",
        default_value = defaults::MANIFEST_PATH
    )]
    pub manifest: PathBuf,

    /// Origin value marking entries from the shared core repository
    #[arg(long, value_name = "ORIGIN", default_value = defaults::CORE_ORIGIN)]
    pub core_origin: String,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Findings for a fully parsed manifest.
#[derive(Debug, Default, PartialEq)]
pub struct ManifestReport {
    pub total: usize,
    pub core: usize,
    /// `(first id, later id)` pairs that share a metadata file.
    pub duplicates: Vec<(String, String)>,
    /// Ids of entries without `path`.
    pub missing_path: Vec<String>,
}

impl ManifestReport {
    pub fn has_errors(&self) -> bool {
        !self.missing_path.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// Inspect parsed entries.
pub fn check_entries(entries: &[ManifestEntry], core_origin: &str) -> ManifestReport {
    let mut report = ManifestReport {
        total: entries.len(),
        ..ManifestReport::default()
    };
    let mut seen: HashMap<String, &str> = HashMap::new();

    for entry in entries {
        let is_core = entry.is_core(core_origin);
        if is_core {
            report.core += 1;
        }
        // Core entries also need a non-empty path to locate their directory.
        let missing = match entry.path.as_deref() {
            None => true,
            Some(path) => is_core && path.is_empty(),
        };
        if missing {
            report.missing_path.push(entry.library_id.clone());
        }
        match seen.entry(entry.key()) {
            Entry::Occupied(first) => report
                .duplicates
                .push((first.get().to_string(), entry.library_id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(&entry.library_id);
            }
        }
    }

    report
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    println!(
        "{} Validating manifest: {}",
        emoji(&out, "🔍", "[SCAN]"),
        args.manifest.display()
    );

    let entries = match manifest::read_all(&args.manifest, defaults::GIT_REF) {
        Ok(entries) => {
            println!("{} Manifest parsed successfully", emoji(&out, "✅", "[OK]"));
            entries
        }
        Err(e) => {
            println!(
                "{} Manifest parsing failed: {}",
                emoji(&out, "❌", "[ERR]"),
                e
            );
            return Err(anyhow::anyhow!("Manifest parsing failed: {}", e));
        }
    };

    let report = check_entries(&entries, &args.core_origin);

    println!("\n{} Manifest Summary:", emoji(&out, "📊", "[INFO]"));
    println!("   Total entries: {}", report.total);
    println!("   Core entries: {}", report.core);
    println!("   Independent entries: {}", report.total - report.core);

    for id in &report.missing_path {
        println!(
            "{} Entry '{}' is missing required field 'path'",
            emoji(&out, "❌", "[ERR]"),
            id
        );
    }
    for (first, later) in &report.duplicates {
        println!(
            "{} Entries '{}' and '{}' write the same metadata file",
            emoji(&out, "⚠️", "[WARN]"),
            first,
            later
        );
    }

    println!("\n{} Validation Result:", emoji(&out, "🎯", "[RESULT]"));

    if report.has_errors() {
        println!(
            "{} Manifest has errors that must be fixed",
            emoji(&out, "❌", "[ERR]")
        );
        return Err(anyhow::anyhow!("Manifest validation failed"));
    }

    if report.has_warnings() && args.strict {
        println!(
            "{} Manifest has warnings (strict mode enabled)",
            emoji(&out, "❌", "[ERR]")
        );
        return Err(anyhow::anyhow!("Manifest validation failed in strict mode"));
    }

    if report.has_warnings() {
        println!(
            "{} Manifest is valid but has warnings",
            emoji(&out, "⚠️", "[WARN]")
        );
    } else {
        println!("{} Manifest is valid", emoji(&out, "✅", "[OK]"));
    }

    Ok(())
}
