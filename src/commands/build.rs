//! Build command implementation
//!
//! Runs the catalog pipeline: read the manifest, fetch each repository,
//! extract its descriptor, write the per-library records and finally the
//! consolidated index.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use component_index::config::BuildConfig;
use component_index::defaults;
use component_index::output::{emoji, OutputConfig};
use component_index::pipeline;
use component_index::repository::RepositoryFetcher;

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Line-delimited JSON manifest of component libraries
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "COMPONENT_INDEX_MANIFEST",
        default_value = defaults::MANIFEST_PATH
    )]
    pub manifest: PathBuf,

    /// Where to write the consolidated index
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "COMPONENT_INDEX_OUTPUT",
        default_value = defaults::OUTPUT_INDEX
    )]
    pub output_index: PathBuf,

    /// Directory for per-library metadata files
    #[arg(
        long,
        value_name = "DIR",
        env = "COMPONENT_INDEX_METADATA_DIR",
        default_value = defaults::METADATA_DIR
    )]
    pub metadata_dir: PathBuf,

    /// Directory holding repository clones (kept between runs)
    #[arg(
        long,
        value_name = "DIR",
        env = "COMPONENT_INDEX_CLONE_ROOT",
        default_value = defaults::CLONE_ROOT
    )]
    pub clone_root: PathBuf,

    /// Ref used for entries without git_ref
    #[arg(long, value_name = "REF", default_value = defaults::GIT_REF)]
    pub default_ref: String,

    /// Origin value marking entries from the shared core repository
    #[arg(long, value_name = "ORIGIN", default_value = defaults::CORE_ORIGIN)]
    pub core_origin: String,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl BuildArgs {
    fn to_config(&self) -> BuildConfig {
        BuildConfig {
            manifest: self.manifest.clone(),
            output_index: self.output_index.clone(),
            metadata_dir: self.metadata_dir.clone(),
            clone_root: self.clone_root.clone(),
            default_ref: self.default_ref.clone(),
            core_origin: self.core_origin.clone(),
        }
    }
}

/// Execute the build command
pub fn execute(args: BuildArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let start_time = Instant::now();

    if !args.manifest.exists() {
        anyhow::bail!("Manifest file not found: {}", args.manifest.display());
    }

    let config = args.to_config();

    if !args.quiet {
        println!(
            "{} Building component index from {}",
            emoji(&out, "📦", "[BUILD]"),
            config.manifest.display()
        );
        println!();
    }

    let mut fetcher = RepositoryFetcher::new(config.clone_root.clone());

    match pipeline::run(&config, &mut fetcher) {
        Ok(summary) => {
            if !args.quiet {
                println!(
                    "{} Generated {} metadata files in '{}' and wrote '{}'",
                    emoji(&out, "✅", "[OK]"),
                    summary.records,
                    config.metadata_dir.display(),
                    config.output_index.display()
                );
                println!(
                    "   {} cloned, {} from cache, {} shared core",
                    summary.cloned, summary.cache_hits, summary.shared
                );
                if summary.warnings > 0 {
                    println!(
                        "{} {} libraries had no pyproject.toml",
                        emoji(&out, "⚠️", "[WARN]"),
                        summary.warnings
                    );
                }
                println!(
                    "   Finished in {:.2}s",
                    start_time.elapsed().as_secs_f64()
                );
            }
            Ok(())
        }
        Err(e) => {
            if !args.quiet {
                println!("{} Build failed", emoji(&out, "❌", "[ERR]"));
                println!();
            }
            Err(e.into())
        }
    }
}
