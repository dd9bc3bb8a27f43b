//! Per-file extraction result

use crate::source_type::SourceType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Natural key of a source node: `<type id>:<filename>`
pub fn source_key(source_type: SourceType, filename: &str) -> String {
    format!("{}:{}", source_type.id(), filename)
}

/// What one loot table or recipe file can produce, and from what
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSource {
    pub source_type: SourceType,
    /// Path of the originating file, relative to its category root
    pub filename: String,
    /// Items consumed (recipe ingredients); empty for loot tables
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub required: BTreeSet<String>,
    /// Items that can come out
    #[serde(default)]
    pub produced: BTreeSet<String>,
}

impl ResourceSource {
    pub fn new(source_type: SourceType, filename: impl Into<String>) -> Self {
        Self {
            source_type,
            filename: filename.into(),
            required: BTreeSet::new(),
            produced: BTreeSet::new(),
        }
    }

    /// Natural key of the graph node this source becomes
    pub fn key(&self) -> String {
        source_key(self.source_type, &self.filename)
    }

    /// Required and produced ids together
    pub fn all_items(&self) -> BTreeSet<String> {
        self.required.union(&self.produced).cloned().collect()
    }

    /// A table that never yields anything
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.produced.is_empty()
    }
}
