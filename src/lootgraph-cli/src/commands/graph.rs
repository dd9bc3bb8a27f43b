//! Graph query command handlers

use super::qualify;
use crate::cli::GraphCommand;
use anyhow::{Context, Result};
use lootgraph::{ItemSourceGraph, SourceNode, SourcesManifest};
use std::path::Path;

/// Handle the graph command
pub fn handle(command: GraphCommand) -> Result<()> {
    match command {
        GraphCommand::Sources { item, manifest } => sources(&qualify(&item), &manifest),
        GraphCommand::Uses { item, manifest } => uses(&qualify(&item), &manifest),
        GraphCommand::Source { key, manifest } => source(&key, &manifest),
        GraphCommand::Stats { manifest, json } => stats(&manifest, json),
    }
}

fn load(manifest_path: &Path) -> Result<(SourcesManifest, ItemSourceGraph)> {
    let manifest = SourcesManifest::load(manifest_path).with_context(|| {
        format!("Failed to load sources manifest {}", manifest_path.display())
    })?;
    let graph = manifest.graph();
    Ok((manifest, graph))
}

/// Comma-separated display names
fn names(manifest: &SourcesManifest, ids: &[&lootgraph::ItemNode]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter()
        .map(|i| manifest.name(i.id()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_sources(manifest: &SourcesManifest, graph: &ItemSourceGraph, sources: &[&SourceNode]) {
    println!("{:<45} {:<22} Requires", "Source", "Type");
    println!("{}", "-".repeat(80));
    for source in sources {
        let required = graph.get_required_items(source.node_key());
        println!(
            "{:<45} {:<22} {}",
            source.filename(),
            source.source_type().name(),
            names(manifest, &required)
        );
    }
}

fn sources(item: &str, manifest_path: &Path) -> Result<()> {
    let (manifest, graph) = load(manifest_path)?;
    let sources = graph.get_sources_for_item(item);

    if sources.is_empty() {
        println!("No sources found for '{}'", item);
        if graph.get_item(item).is_none() {
            println!("\nThe item does not appear in {} at all", manifest.version);
        }
        return Ok(());
    }

    println!("{} ({}) can be obtained from:\n", manifest.name(item), item);
    print_sources(&manifest, &graph, &sources);
    Ok(())
}

fn uses(item: &str, manifest_path: &Path) -> Result<()> {
    let (manifest, graph) = load(manifest_path)?;
    let consumers = graph.get_consumers(item);

    if consumers.is_empty() {
        println!("Nothing consumes '{}'", item);
        return Ok(());
    }

    println!("{} ({}) is used by:\n", manifest.name(item), item);
    println!("{:<45} {:<22} Produces", "Source", "Type");
    println!("{}", "-".repeat(80));
    for source in consumers {
        let produced = graph.get_produced_items(source.node_key());
        println!(
            "{:<45} {:<22} {}",
            source.filename(),
            source.source_type().name(),
            names(&manifest, &produced)
        );
    }
    Ok(())
}

fn source(key: &str, manifest_path: &Path) -> Result<()> {
    let (manifest, graph) = load(manifest_path)?;

    let Some(node) = graph.get_source_by_key(key) else {
        println!("No source '{}'", key);
        println!("\nKeys look like 'minecraft:crafting_shaped:stick.json'");
        return Ok(());
    };

    println!("{}\n", node);
    println!("Requires:");
    for item in graph.get_required_items(key) {
        println!("  {:<40} {}", item.id(), manifest.name(item.id()));
    }
    println!("Produces:");
    for item in graph.get_produced_items(key) {
        println!("  {:<40} {}", item.id(), manifest.name(item.id()));
    }
    Ok(())
}

fn stats(manifest_path: &Path, json: bool) -> Result<()> {
    let (manifest, graph) = load(manifest_path)?;
    let stats = graph.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Version {}: {}", manifest.version, stats);
    }
    Ok(())
}
