//! Loot table parsing
//!
//! Entries and pools are mutually recursive: an alternatives entry holds
//! entries, and a loot table entry can hold a whole inline table of pools.
//! Both parsers are thin views over one [`LootTableParser`], so there is no
//! half-wired state to observe; the parser holds no mutable state and can be
//! cloned into concurrent tasks freely.

mod entry;
mod pool;

pub use entry::{Entry, EntryParser, InlineTable, TableValue};
pub use pool::{Pool, PoolParser};

use crate::content::ContentProvider;
use crate::error::{Cause, FileError, Result};
use crate::resource::ResourceSource;
use crate::source_type::SourceType;
use crate::version::GameVersion;
use serde::Deserialize;
use std::sync::Arc;

/// Longest chain of table-to-table references followed from one file
pub const MAX_REFERENCE_DEPTH: usize = 32;

/// Top level of a loot table file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LootTable {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Absent for tables that never drop anything
    pub pools: Option<Vec<Pool>>,
}

/// Where errors are reported and how deep in references we are
pub(crate) struct Scope<'a> {
    /// Top-level file under extraction
    pub(crate) origin: &'a str,
    depth: usize,
}

impl<'a> Scope<'a> {
    pub(crate) fn root(origin: &'a str) -> Self {
        Self { origin, depth: 0 }
    }

    pub(crate) fn deeper(&self) -> Result<Scope<'a>> {
        if self.depth >= MAX_REFERENCE_DEPTH {
            return Err(self.fail(Cause::ReferenceDepth(MAX_REFERENCE_DEPTH)));
        }
        Ok(Scope {
            origin: self.origin,
            depth: self.depth + 1,
        })
    }

    pub(crate) fn fail(&self, cause: Cause) -> FileError {
        FileError::new(self.origin, cause)
    }
}

/// Parses loot table files into [`ResourceSource`]s
#[derive(Clone)]
pub struct LootTableParser {
    provider: Arc<dyn ContentProvider>,
    version: GameVersion,
}

impl LootTableParser {
    /// `provider` resolves cross-file references, rooted at the loot table
    /// directory of `version`
    pub fn new(provider: Arc<dyn ContentProvider>, version: GameVersion) -> Self {
        Self { provider, version }
    }

    pub fn version(&self) -> GameVersion {
        self.version
    }

    pub fn provider(&self) -> &dyn ContentProvider {
        self.provider.as_ref()
    }

    /// Entry-level view
    pub fn entries(&self) -> EntryParser<'_> {
        EntryParser { parser: self }
    }

    /// Pool-level view
    pub fn pools(&self) -> PoolParser<'_> {
        PoolParser { parser: self }
    }

    /// Parse loot table text
    pub fn parse_table(&self, content: &str, filename: &str) -> Result<ResourceSource> {
        self.table_in(content, filename, &Scope::root(filename))
    }

    /// Read a loot table through the provider and parse it
    pub fn parse_file(&self, filename: &str) -> Result<ResourceSource> {
        let content = self
            .provider
            .read(filename)
            .map_err(|e| FileError::new(filename, Cause::Read(e)))?;
        self.parse_table(&content, filename)
    }

    pub(crate) fn table_in(
        &self,
        content: &str,
        filename: &str,
        scope: &Scope,
    ) -> Result<ResourceSource> {
        let table: LootTable =
            serde_json::from_str(content).map_err(|e| scope.fail(Cause::Json(e)))?;

        let source_type = classify(table.kind.as_deref(), filename);
        let mut source = ResourceSource::new(source_type, filename);

        if let Some(pools) = &table.pools {
            source.produced = self.pools().pools_in(pools, scope)?;
        }

        Ok(source)
    }
}

impl std::fmt::Debug for LootTableParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LootTableParser")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

fn classify(kind: Option<&str>, filename: &str) -> SourceType {
    let Some(kind) = kind else {
        tracing::warn!(filename, "Loot table has no type");
        return SourceType::Unknown;
    };

    match SourceType::from_id(kind) {
        source_type if source_type.is_loot_table() => source_type,
        source_type if source_type.is_recipe() => {
            tracing::warn!(filename, table_type = kind, "Recipe type in a loot table");
            SourceType::Unknown
        }
        _ => {
            tracing::warn!(filename, table_type = kind, "Unknown loot table type");
            SourceType::Unknown
        }
    }
}
