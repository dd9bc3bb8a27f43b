//! Loot table pools

use super::entry::Entry;
use super::{LootTableParser, Scope};
use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeSet;

/// One roll group of a loot table; rolls and bonus rolls are not modeled
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Pool {
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Resolves pools through the entry parser
pub struct PoolParser<'p> {
    pub(super) parser: &'p LootTableParser,
}

impl PoolParser<'_> {
    /// Union of everything the pools can yield
    ///
    /// Stops at the first pool that fails.
    pub fn parse_pools(&self, pools: &[Pool], filename: &str) -> Result<BTreeSet<String>> {
        self.pools_in(pools, &Scope::root(filename))
    }

    pub(super) fn pools_in(&self, pools: &[Pool], scope: &Scope) -> Result<BTreeSet<String>> {
        let entries = self.parser.entries();
        let mut items = BTreeSet::new();
        for pool in pools {
            items.extend(entries.entries_in(&pool.entries, scope)?);
        }
        Ok(items)
    }
}
