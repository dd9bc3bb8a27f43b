//! Mutable accumulation side of the graph

use super::types::{ItemKey, ItemNode, SourceKey, SourceNode};
use super::ItemSourceGraph;
use crate::resource::{source_key, ResourceSource};
use crate::source_type::SourceType;
use std::collections::{BTreeSet, HashMap};

/// Grows an [`ItemSourceGraph`]; single owner, consumed by [`Builder::build`]
#[derive(Debug, Default)]
pub struct Builder {
    items: Vec<ItemNode>,
    sources: Vec<SourceNode>,
    item_index: HashMap<String, ItemKey>,
    source_index: HashMap<String, SourceKey>,
    /// item -> sources that require it
    consumers: Vec<BTreeSet<SourceKey>>,
    /// item -> sources that produce it
    producers: Vec<BTreeSet<SourceKey>>,
    /// source -> items it requires
    required: Vec<BTreeSet<ItemKey>>,
    /// source -> items it produces
    produced: Vec<BTreeSet<ItemKey>>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the node for an item id
    pub fn add_item_node(&mut self, id: &str) -> ItemKey {
        if let Some(&key) = self.item_index.get(id) {
            return key;
        }

        let key = ItemKey(self.items.len() as u32);
        self.items.push(ItemNode {
            key,
            id: id.to_string(),
        });
        self.item_index.insert(id.to_string(), key);
        self.consumers.push(BTreeSet::new());
        self.producers.push(BTreeSet::new());
        key
    }

    /// Get or create the node for a (type, filename) pair
    pub fn add_source_node(&mut self, source_type: SourceType, filename: &str) -> SourceKey {
        let node_key = source_key(source_type, filename);
        if let Some(&key) = self.source_index.get(&node_key) {
            return key;
        }

        let key = SourceKey(self.sources.len() as u32);
        self.sources.push(SourceNode {
            key,
            source_type,
            filename: filename.to_string(),
            node_key: node_key.clone(),
        });
        self.source_index.insert(node_key, key);
        self.required.push(BTreeSet::new());
        self.produced.push(BTreeSet::new());
        key
    }

    /// Record that `source` requires `item`
    pub fn add_item_to_source_edge(&mut self, item: ItemKey, source: SourceKey) {
        if !self.owns(item, source) {
            tracing::warn!("Ignoring edge to a node from another builder");
            return;
        }
        self.consumers[item.index()].insert(source);
        self.required[source.index()].insert(item);
    }

    /// Record that `source` produces `item`
    pub fn add_source_to_item_edge(&mut self, source: SourceKey, item: ItemKey) {
        if !self.owns(item, source) {
            tracing::warn!("Ignoring edge to a node from another builder");
            return;
        }
        self.producers[item.index()].insert(source);
        self.produced[source.index()].insert(item);
    }

    /// Add a whole extraction result: one source node plus all its edges
    ///
    /// Ignored sources never enter the graph.
    pub fn add_resource_source(&mut self, resource: &ResourceSource) -> Option<SourceKey> {
        if resource.source_type == SourceType::Ignored {
            return None;
        }

        let source = self.add_source_node(resource.source_type, &resource.filename);
        for id in &resource.required {
            let item = self.add_item_node(id);
            self.add_item_to_source_edge(item, source);
        }
        for id in &resource.produced {
            let item = self.add_item_node(id);
            self.add_source_to_item_edge(source, item);
        }
        Some(source)
    }

    /// Node behind an item handle
    pub fn item(&self, key: ItemKey) -> Option<&ItemNode> {
        self.items.get(key.index())
    }

    /// Node behind a source handle
    pub fn source(&self, key: SourceKey) -> Option<&SourceNode> {
        self.sources.get(key.index())
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Freeze into an immutable graph
    pub fn build(self) -> ItemSourceGraph {
        let sources = self.sources;

        // Producers are stored ranked for display: preference, then key
        let rank = |set: BTreeSet<SourceKey>| -> Box<[SourceKey]> {
            let mut keys: Vec<SourceKey> = set.into_iter().collect();
            keys.sort_by(|a, b| {
                let (a, b) = (&sources[a.index()], &sources[b.index()]);
                b.source_type
                    .preference()
                    .cmp(&a.source_type.preference())
                    .then_with(|| a.node_key.cmp(&b.node_key))
            });
            keys.into_boxed_slice()
        };
        let producers: Box<[Box<[SourceKey]>]> = self.producers.into_iter().map(rank).collect();

        ItemSourceGraph {
            items: self.items.into_boxed_slice(),
            item_index: self.item_index,
            source_index: self.source_index,
            consumers: freeze(self.consumers),
            producers,
            required: freeze(self.required),
            produced: freeze(self.produced),
            sources: sources.into_boxed_slice(),
        }
    }

    fn owns(&self, item: ItemKey, source: SourceKey) -> bool {
        item.index() < self.items.len() && source.index() < self.sources.len()
    }
}

fn freeze<K: Copy>(sets: Vec<BTreeSet<K>>) -> Box<[Box<[K]>]> {
    sets.into_iter()
        .map(|set| set.into_iter().collect::<Vec<_>>().into_boxed_slice())
        .collect()
}
