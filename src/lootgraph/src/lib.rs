//! Resource production graph for Minecraft data packs
//!
//! Loot tables and recipes describe how items are obtained. This crate reads
//! them into a bipartite graph linking items to the sources that yield them,
//! and encodes a user's chosen path through that graph as a compact string.
//!
//! # Pipeline
//!
//! ```text
//! data files --> LootTableParser / parse_recipe --> ResourceSource
//!            --> graph::Builder --> ItemSourceGraph (frozen, shareable)
//! ```
//!
//! [`ProductionPath`] works on the same id space but is built from user
//! selections, not from the graph.
//!
//! # Data Layout
//!
//! ```text
//! <base>/<version>/data/minecraft/loot_table/blocks/stone.json
//! <base>/<version>/data/minecraft/recipe/stick.json
//! <base>/<version>/assets/minecraft/lang/en_us.json
//! ```
//!
//! Versions before 1.21 use the plural `loot_tables` and `recipes`.

mod content;
mod error;
mod extract;
pub mod graph;
pub mod item;
pub mod loot;
mod names;
mod path;
mod recipe;
mod resource;
mod source_type;
mod version;

// Re-export main types
pub use content::{ContentProvider, DirectoryProvider, MemoryProvider};
pub use error::{Cause, ContentError, FileError, ManifestError, Result};
pub use extract::{
    DataLayout, ExtractOptions, Extraction, Extractor, FailurePolicy, FileKind, SourcesManifest,
    DEFAULT_CONCURRENCY,
};
pub use graph::{Builder, GraphStats, ItemKey, ItemNode, ItemSourceGraph, SourceKey, SourceNode};
pub use loot::{LootTableParser, MAX_REFERENCE_DEPTH};
pub use names::{NameCache, NamesError};
pub use path::{ProductionPath, MAX_DECODE_DEPTH};
pub use recipe::{parse_recipe, Ingredient, Recipe, RecipeResult};
pub use resource::{source_key, ResourceSource};
pub use source_type::SourceType;
pub use version::{GameVersion, VersionError};
