//! Extraction command handler

use crate::config::Config;
use anyhow::{bail, Context, Result};
use lootgraph::{DataLayout, ExtractOptions, Extractor, FailurePolicy, GameVersion};
use std::path::{Path, PathBuf};

/// Arguments for one extraction run
pub struct Request {
    pub version: Option<GameVersion>,
    pub data_root: Option<PathBuf>,
    pub output: PathBuf,
    pub concurrency: Option<usize>,
    pub policy: Option<FailurePolicy>,
}

/// Handle the extract command
pub async fn handle(request: Request) -> Result<()> {
    let config = Config::load()?;
    let data_root = config.data_root(request.data_root)?;
    let version = config.version(request.version)?;
    let options = ExtractOptions {
        concurrency: config.concurrency(request.concurrency),
        policy: config.policy(request.policy),
    };

    let layout = DataLayout::new(&data_root, version);
    if !layout.version_dir().is_dir() {
        bail!(
            "No data for version {} (expected {})",
            version,
            layout.version_dir().display()
        );
    }

    println!(
        "Extracting {} from {} ({} at a time, {} on failure)...",
        version,
        layout.version_dir().display(),
        options.concurrency,
        options.policy
    );

    let extractor = Extractor::open(layout);
    let files = extractor.files().len();
    let extraction = extractor
        .extract_all(options)
        .await
        .context("Extraction aborted")?;

    if !extraction.failures.is_empty() {
        println!("\nSkipped {} files:", extraction.failures.len());
        for failure in &extraction.failures {
            println!("  {}", failure);
        }
        println!();
    }

    let stats = extraction.graph().stats();
    println!(
        "Read {} files: {} sources, {} ignored, {} failed",
        files,
        extraction.sources.len(),
        extraction.ignored,
        extraction.failures.len()
    );
    println!("Graph: {}", stats);

    write_manifest(extraction.into_manifest(version), &request.output)
}

fn write_manifest(manifest: lootgraph::SourcesManifest, output: &Path) -> Result<()> {
    manifest
        .save(output)
        .with_context(|| format!("Failed to write manifest to {}", output.display()))?;
    println!("Manifest written to {}", output.display());
    Ok(())
}
