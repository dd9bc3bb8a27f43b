//! Bipartite item/source production graph
//!
//! Items link to the sources that consume them, and sources link to the
//! items they produce. The graph is grown through a [`Builder`] and then
//! frozen; a frozen graph has no interior mutability and can be shared
//! across threads without locking.
//!
//! Cycles are normal (logs -> planks -> crafting table, which gates more
//! plank recipes) and are neither detected nor resolved here.

mod builder;
mod types;

pub use builder::Builder;
pub use types::{GraphStats, ItemKey, ItemNode, SourceKey, SourceNode};

use crate::resource::{source_key, ResourceSource};
use crate::source_type::SourceType;
use std::collections::HashMap;

/// Frozen item/source graph
#[derive(Debug)]
pub struct ItemSourceGraph {
    pub(crate) items: Box<[ItemNode]>,
    pub(crate) sources: Box<[SourceNode]>,
    pub(crate) item_index: HashMap<String, ItemKey>,
    pub(crate) source_index: HashMap<String, SourceKey>,
    /// item -> sources that require it
    pub(crate) consumers: Box<[Box<[SourceKey]>]>,
    /// item -> sources that produce it, display-ranked
    pub(crate) producers: Box<[Box<[SourceKey]>]>,
    /// source -> items it requires
    pub(crate) required: Box<[Box<[ItemKey]>]>,
    /// source -> items it produces
    pub(crate) produced: Box<[Box<[ItemKey]>]>,
}

impl ItemSourceGraph {
    /// Start an empty builder
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Build a graph straight from extraction results
    pub fn from_sources<'a, I>(sources: I) -> Self
    where
        I: IntoIterator<Item = &'a ResourceSource>,
    {
        let mut builder = Builder::new();
        for source in sources {
            builder.add_resource_source(source);
        }
        builder.build()
    }

    /// Item node by id
    pub fn get_item(&self, id: &str) -> Option<&ItemNode> {
        self.item_index.get(id).map(|k| &self.items[k.index()])
    }

    /// Source node by type and filename
    pub fn get_source(&self, source_type: SourceType, filename: &str) -> Option<&SourceNode> {
        self.get_source_by_key(&source_key(source_type, filename))
    }

    /// Source node by natural key (`<type id>:<filename>`)
    pub fn get_source_by_key(&self, node_key: &str) -> Option<&SourceNode> {
        self.source_index
            .get(node_key)
            .map(|k| &self.sources[k.index()])
    }

    /// Sources that can produce an item, best-ranked first
    ///
    /// Unknown items and items nothing produces both give an empty list.
    pub fn get_sources_for_item(&self, id: &str) -> Vec<&SourceNode> {
        match self.item_index.get(id) {
            Some(key) => self.resolve_sources(&self.producers[key.index()]),
            None => Vec::new(),
        }
    }

    /// Sources that consume an item as an ingredient
    pub fn get_consumers(&self, id: &str) -> Vec<&SourceNode> {
        match self.item_index.get(id) {
            Some(key) => self.resolve_sources(&self.consumers[key.index()]),
            None => Vec::new(),
        }
    }

    /// Items a source requires; empty for unregistered sources
    pub fn get_required_items(&self, node_key: &str) -> Vec<&ItemNode> {
        match self.source_index.get(node_key) {
            Some(key) => self.resolve_items(&self.required[key.index()]),
            None => Vec::new(),
        }
    }

    /// Items a source produces; empty for unregistered sources
    pub fn get_produced_items(&self, node_key: &str) -> Vec<&ItemNode> {
        match self.source_index.get(node_key) {
            Some(key) => self.resolve_items(&self.produced[key.index()]),
            None => Vec::new(),
        }
    }

    /// All item nodes in insertion order
    pub fn items(&self) -> impl Iterator<Item = &ItemNode> {
        self.items.iter()
    }

    /// All source nodes in insertion order
    pub fn sources(&self) -> impl Iterator<Item = &SourceNode> {
        self.sources.iter()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Node and edge counts
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            items: self.items.len(),
            tags: self.items.iter().filter(|i| i.is_tag()).count(),
            sources: self.sources.len(),
            requirement_edges: self.required.iter().map(|r| r.len()).sum(),
            production_edges: self.produced.iter().map(|p| p.len()).sum(),
        }
    }

    fn resolve_sources(&self, keys: &[SourceKey]) -> Vec<&SourceNode> {
        keys.iter().map(|k| &self.sources[k.index()]).collect()
    }

    fn resolve_items(&self, keys: &[ItemKey]) -> Vec<&ItemNode> {
        keys.iter().map(|k| &self.items[k.index()]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&ItemNode]) -> Vec<String> {
        items.iter().map(|i| i.id().to_string()).collect()
    }

    fn keys(sources: &[&SourceNode]) -> Vec<String> {
        sources.iter().map(|s| s.node_key().to_string()).collect()
    }

    /// `from` --(required by)--> source --(produces)--> `to`
    fn wire(builder: &mut Builder, from: &str, kind: SourceType, file: &str, to: &str) {
        let input = builder.add_item_node(from);
        let source = builder.add_source_node(kind, file);
        let output = builder.add_item_node(to);
        builder.add_item_to_source_edge(input, source);
        builder.add_source_to_item_edge(source, output);
    }

    #[test]
    fn test_add_source_node_is_idempotent() {
        let mut builder = Builder::new();
        let a = builder.add_source_node(SourceType::CraftingShaped, "stick.json");
        let b = builder.add_source_node(SourceType::CraftingShaped, "stick.json");
        assert_eq!(a, b);
        assert_eq!(builder.source_count(), 1);
        assert_eq!(builder.source(a), builder.source(b));

        // Same file under a different type is a different source
        let c = builder.add_source_node(SourceType::CraftingShapeless, "stick.json");
        assert_ne!(a, c);
    }

    #[test]
    fn test_add_item_node_is_idempotent() {
        let mut builder = Builder::new();
        let a = builder.add_item_node("minecraft:stick");
        let b = builder.add_item_node("minecraft:stick");
        assert_eq!(a, b);
        assert_eq!(builder.item_count(), 1);
        assert_eq!(builder.item(a).map(|n| n.id()), Some("minecraft:stick"));
    }

    #[test]
    fn test_unknown_item_has_no_sources() {
        let graph = Builder::new().build();
        assert!(graph.get_sources_for_item("minecraft:stick").is_empty());
        assert!(graph.get_consumers("minecraft:stick").is_empty());
    }

    #[test]
    fn test_item_without_producers_has_no_sources() {
        let mut builder = Builder::new();
        wire(
            &mut builder,
            "minecraft:oak_planks",
            SourceType::CraftingShaped,
            "stick.json",
            "minecraft:stick",
        );
        let graph = builder.build();

        // Planks are registered but only as an input
        assert!(graph.get_item("minecraft:oak_planks").is_some());
        assert!(graph.get_sources_for_item("minecraft:oak_planks").is_empty());
    }

    #[test]
    fn test_unregistered_source_has_no_items() {
        let graph = Builder::new().build();
        assert!(graph.get_required_items("minecraft:smelting:nope.json").is_empty());
        assert!(graph.get_produced_items("minecraft:smelting:nope.json").is_empty());
    }

    #[test]
    fn test_planks_to_sticks() {
        let mut builder = Builder::new();
        wire(
            &mut builder,
            "minecraft:oak_planks",
            SourceType::CraftingShaped,
            "stick.json",
            "minecraft:stick",
        );
        let graph = builder.build();

        let crafting = graph
            .get_source(SourceType::CraftingShaped, "stick.json")
            .expect("source registered");
        assert_eq!(
            keys(&graph.get_sources_for_item("minecraft:stick")),
            vec![crafting.node_key().to_string()]
        );
        assert_eq!(
            ids(&graph.get_required_items(crafting.node_key())),
            vec!["minecraft:oak_planks"]
        );
        assert_eq!(
            ids(&graph.get_produced_items(crafting.node_key())),
            vec!["minecraft:stick"]
        );
        assert_eq!(
            keys(&graph.get_consumers("minecraft:oak_planks")),
            vec![crafting.node_key().to_string()]
        );
    }

    #[test]
    fn test_multiple_sources_per_item() {
        let mut builder = Builder::new();
        wire(
            &mut builder,
            "minecraft:iron_ore",
            SourceType::BlockBreak,
            "blocks/iron_ore.json",
            "minecraft:iron_ingot",
        );
        wire(
            &mut builder,
            "minecraft:raw_iron",
            SourceType::Smelting,
            "iron_ingot_from_smelting_raw_iron.json",
            "minecraft:iron_ingot",
        );
        let graph = builder.build();

        let sources = graph.get_sources_for_item("minecraft:iron_ingot");
        assert_eq!(sources.len(), 2);
        // Ranked by preference: smelting outranks block drops
        assert_eq!(sources[0].source_type(), SourceType::Smelting);
    }

    #[test]
    fn test_cycles_are_tolerated() {
        let mut builder = Builder::new();
        wire(
            &mut builder,
            "#minecraft:logs",
            SourceType::CraftingShapeless,
            "oak_planks.json",
            "minecraft:oak_planks",
        );
        wire(
            &mut builder,
            "minecraft:oak_planks",
            SourceType::CraftingShaped,
            "crafting_table.json",
            "minecraft:crafting_table",
        );
        // The table in turn feeds back into a plank recipe
        let table = builder.add_item_node("minecraft:crafting_table");
        let planks_recipe = builder.add_source_node(SourceType::CraftingShapeless, "oak_planks.json");
        builder.add_item_to_source_edge(table, planks_recipe);
        let graph = builder.build();

        assert_eq!(graph.get_sources_for_item("minecraft:crafting_table").len(), 1);
        assert_eq!(graph.get_sources_for_item("minecraft:oak_planks").len(), 1);
        let required = ids(&graph.get_required_items("minecraft:crafting_shapeless:oak_planks.json"));
        assert_eq!(required, vec!["#minecraft:logs", "minecraft:crafting_table"]);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let mut builder = Builder::new();
        wire(&mut builder, "a:x", SourceType::Smelting, "y.json", "a:y");
        wire(&mut builder, "a:x", SourceType::Smelting, "y.json", "a:y");
        let graph = builder.build();

        let stats = graph.stats();
        assert_eq!(stats.items, 2);
        assert_eq!(stats.sources, 1);
        assert_eq!(stats.requirement_edges, 1);
        assert_eq!(stats.production_edges, 1);
    }

    #[test]
    fn test_from_sources_skips_ignored() {
        let mut recipe = ResourceSource::new(SourceType::Stonecutting, "stone_slab.json");
        recipe.required.insert("minecraft:stone".into());
        recipe.produced.insert("minecraft:stone_slab".into());
        let mut special = ResourceSource::new(SourceType::Ignored, "armor_dye.json");
        special.produced.insert("minecraft:leather_helmet".into());

        let graph = ItemSourceGraph::from_sources([&recipe, &special]);
        assert_eq!(graph.source_count(), 1);
        assert!(graph.get_item("minecraft:leather_helmet").is_none());
        assert_eq!(graph.get_sources_for_item("minecraft:stone_slab").len(), 1);
    }

    #[test]
    fn test_stats_counts_tags() {
        let mut builder = Builder::new();
        wire(&mut builder, "#minecraft:logs", SourceType::CraftingShapeless, "p.json", "minecraft:oak_planks");
        let stats = builder.build().stats();
        assert_eq!(stats.tags, 1);
        assert_eq!(
            stats.to_string(),
            "2 items (1 tags), 1 sources, 1 requirement edges, 1 production edges"
        );
    }

    #[test]
    fn test_graph_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ItemSourceGraph>();
    }
}
