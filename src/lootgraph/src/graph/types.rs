//! Graph node and statistics types

use crate::source_type::SourceType;
use serde::Serialize;
use std::fmt;

/// Handle of an item node within one builder/graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(pub(crate) u32);

/// Handle of a source node within one builder/graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceKey(pub(crate) u32);

impl ItemKey {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl SourceKey {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// An item or tag; identity is the id string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemNode {
    pub(crate) key: ItemKey,
    pub(crate) id: String,
}

impl ItemNode {
    pub fn key(&self) -> ItemKey {
        self.key
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_tag(&self) -> bool {
        crate::item::is_tag(&self.id)
    }
}

/// One originating file; identity is `<type id>:<filename>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceNode {
    pub(crate) key: SourceKey,
    pub(crate) source_type: SourceType,
    pub(crate) filename: String,
    pub(crate) node_key: String,
}

impl SourceNode {
    pub fn key(&self) -> SourceKey {
        self.key
    }

    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Natural key (`minecraft:block:blocks/stone.json`)
    pub fn node_key(&self) -> &str {
        &self.node_key
    }
}

impl fmt::Display for SourceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.filename, self.source_type.name())
    }
}

/// Node and edge counts, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub items: usize,
    pub tags: usize,
    pub sources: usize,
    /// item -> source edges (source requires item)
    pub requirement_edges: usize,
    /// source -> item edges (source produces item)
    pub production_edges: usize,
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} items ({} tags), {} sources, {} requirement edges, {} production edges",
            self.items, self.tags, self.sources, self.requirement_edges, self.production_edges
        )
    }
}
