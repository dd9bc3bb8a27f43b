//! Command handlers for lootgraph CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod extract;
pub mod graph;
pub mod path;

/// Qualify a bare item id with the default namespace
///
/// "stick" -> "minecraft:stick", "#logs" -> "#minecraft:logs"
pub fn qualify(id: &str) -> String {
    let id = id.trim();
    if id.contains(':') {
        return id.to_string();
    }
    match id.strip_prefix(lootgraph::item::TAG_PREFIX) {
        Some(tag) => lootgraph::item::tag_id(&format!(
            "{}:{}",
            lootgraph::item::DEFAULT_NAMESPACE,
            tag
        )),
        None => format!("{}:{}", lootgraph::item::DEFAULT_NAMESPACE, id),
    }
}
