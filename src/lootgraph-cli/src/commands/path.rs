//! Production path command handlers

use crate::cli::PathCommand;
use anyhow::{Context, Result};
use lootgraph::ProductionPath;

/// Handle the path command
pub fn handle(command: PathCommand) -> Result<()> {
    match command {
        PathCommand::Decode { value, query, json } => decode(&value, query, json),
        PathCommand::Encode { json, query } => encode(&json, query),
    }
}

fn decode(value: &str, query: bool, json: bool) -> Result<()> {
    let decoded = if query {
        ProductionPath::from_query_value(value)
    } else {
        ProductionPath::decode(value)
    };

    // Undecodable input means nothing has been chosen yet
    let Some(path) = decoded else {
        println!("No production path selected");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&path)?);
        return Ok(());
    }

    print_tree(&path, 0);
    println!();
    println!("Items:     {}", path.get_all_item_ids().len());
    println!("Decisions: {}", path.count_decisions());
    println!("Complete:  {}", if path.is_complete() { "yes" } else { "no" });
    Ok(())
}

fn print_tree(path: &ProductionPath, depth: usize) {
    let indent = "  ".repeat(depth);
    match &path.source {
        Some(source) => println!("{}{} <- {}", indent, path.item_id, source),
        None => println!("{}{}", indent, path.item_id),
    }
    for requirement in &path.requirements {
        print_tree(requirement, depth + 1);
    }
}

fn encode(json: &str, query: bool) -> Result<()> {
    let path: ProductionPath =
        serde_json::from_str(json).context("Failed to parse production path JSON")?;

    println!("{}", path.encode());
    if query {
        println!("{}", path.to_query_value());
    }
    Ok(())
}
