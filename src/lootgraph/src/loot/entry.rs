//! Loot table entries
//!
//! An entry is decoded once, at the JSON boundary, into a variant holding
//! exactly the fields its kind needs. Kinds outside the supported set are
//! kept as [`Entry::Unsupported`] so the parser can report them against the
//! file they came from.

use super::pool::Pool;
use super::{LootTableParser, Scope};
use crate::error::{Cause, Result};
use crate::item;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// One node of a pool's `entries` array
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Drops nothing
    Empty,
    /// A single item
    Item { name: String },
    /// Contents computed at runtime by the game
    Dynamic {
        name: String,
        conditions: Vec<Value>,
    },
    /// Every item in a tag; `None` when neither `tag` nor `name` was given
    Tag { tag: Option<String> },
    /// Several possible outcomes
    Alternatives { children: Vec<Entry> },
    /// Another loot table, by id or inline; `None` when no value was given
    LootTable { value: Option<TableValue> },
    /// Any other `type`, kept for reporting
    Unsupported(String),
}

/// `value` of a loot table entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TableValue {
    /// Id of another table (or, occasionally, a plain item id)
    Id(String),
    /// A nested table defined in place
    Inline(InlineTable),
}

/// Loot table nested directly inside an entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InlineTable {
    #[serde(default)]
    pub pools: Vec<Pool>,
}

#[derive(Deserialize)]
struct NamedBody {
    name: String,
}

#[derive(Deserialize)]
struct DynamicBody {
    name: String,
    #[serde(default)]
    conditions: Vec<Value>,
}

#[derive(Deserialize)]
struct TagBody {
    tag: Option<String>,
    name: Option<String>,
}

#[derive(Deserialize)]
struct AlternativesBody {
    #[serde(default)]
    children: Vec<Entry>,
}

#[derive(Deserialize)]
struct LootTableBody {
    value: Option<TableValue>,
    name: Option<String>,
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        let kind = match map.remove("type") {
            Some(Value::String(kind)) => kind,
            Some(other) => {
                return Err(de::Error::custom(format!(
                    "entry type must be a string, got {}",
                    other
                )))
            }
            None => return Err(de::Error::missing_field("type")),
        };

        fn body<T: serde::de::DeserializeOwned, E: de::Error>(
            map: Map<String, Value>,
        ) -> std::result::Result<T, E> {
            serde_json::from_value(Value::Object(map)).map_err(E::custom)
        }

        let entry = match item::path(&kind) {
            "empty" => Entry::Empty,
            "item" => Entry::Item {
                name: body::<NamedBody, D::Error>(map)?.name,
            },
            "dynamic" => {
                let b = body::<DynamicBody, D::Error>(map)?;
                Entry::Dynamic {
                    name: b.name,
                    conditions: b.conditions,
                }
            }
            "tag" => {
                let b = body::<TagBody, D::Error>(map)?;
                Entry::Tag {
                    tag: b.tag.or(b.name),
                }
            }
            "alternatives" => Entry::Alternatives {
                children: body::<AlternativesBody, D::Error>(map)?.children,
            },
            "loot_table" => {
                let b = body::<LootTableBody, D::Error>(map)?;
                Entry::LootTable {
                    value: b.value.or(b.name.map(TableValue::Id)),
                }
            }
            _ => Entry::Unsupported(kind),
        };

        Ok(entry)
    }
}

/// Whether any condition restricts a dynamic entry to the decorated pot block
fn targets_decorated_pot(conditions: &[Value]) -> bool {
    conditions.iter().any(|c| {
        c.get("block")
            .and_then(Value::as_str)
            .is_some_and(|b| item::path(b) == "decorated_pot")
    })
}

/// Resolves entries to the item ids they can yield
pub struct EntryParser<'p> {
    pub(super) parser: &'p LootTableParser,
}

impl EntryParser<'_> {
    /// Resolve a single entry
    pub fn parse_entry(&self, entry: &Entry, filename: &str) -> Result<BTreeSet<String>> {
        self.entry_in(entry, &Scope::root(filename))
    }

    /// Resolve every entry and union the results
    ///
    /// Fails as a whole if any single entry fails.
    pub fn parse_entries(&self, entries: &[Entry], filename: &str) -> Result<BTreeSet<String>> {
        self.entries_in(entries, &Scope::root(filename))
    }

    pub(super) fn entries_in(&self, entries: &[Entry], scope: &Scope) -> Result<BTreeSet<String>> {
        let mut items = BTreeSet::new();
        for entry in entries {
            items.extend(self.entry_in(entry, scope)?);
        }
        Ok(items)
    }

    fn entry_in(&self, entry: &Entry, scope: &Scope) -> Result<BTreeSet<String>> {
        match entry {
            Entry::Empty => Ok(BTreeSet::new()),

            Entry::Item { name } => Ok(BTreeSet::from([name.clone()])),

            Entry::Dynamic { name, conditions } => self.dynamic(name, conditions, scope),

            Entry::Tag { tag: Some(tag) } => Ok(BTreeSet::from([item::tag_id(tag)])),
            Entry::Tag { tag: None } => Err(scope.fail(Cause::MissingTag)),

            // Every alternative is a possible outcome
            Entry::Alternatives { children } => self.entries_in(children, scope),

            Entry::LootTable { value: Some(value) } => self.table_value(value, scope),
            Entry::LootTable { value: None } => Err(scope.fail(Cause::MissingTableValue)),

            Entry::Unsupported(kind) => {
                tracing::warn!(
                    filename = scope.origin,
                    entry_type = %kind,
                    "Unsupported loot entry type"
                );
                Err(scope.fail(Cause::UnsupportedEntry(kind.clone())))
            }
        }
    }

    fn dynamic(&self, name: &str, conditions: &[Value], scope: &Scope) -> Result<BTreeSet<String>> {
        match item::path(name) {
            // Container contents can't be known statically
            "contents" => Ok(BTreeSet::new()),
            "sherds"
                if targets_decorated_pot(conditions)
                    || self.parser.version().has_legacy_sherds() =>
            {
                let tag = format!("{}:decorated_pot_sherds", item::namespace(name));
                Ok(BTreeSet::from([item::tag_id(&tag)]))
            }
            _ => {
                tracing::warn!(
                    filename = scope.origin,
                    name,
                    "Unhandled dynamic loot entry"
                );
                Err(scope.fail(Cause::UnhandledDynamic(name.to_string())))
            }
        }
    }

    fn table_value(&self, value: &TableValue, scope: &Scope) -> Result<BTreeSet<String>> {
        let resolved = match value {
            TableValue::Id(id) => BTreeSet::from([id.clone()]),
            TableValue::Inline(table) => self.parser.pools().pools_in(&table.pools, scope)?,
        };

        // A lone id with a path separator names another table file
        if resolved.len() == 1 {
            if let Some(id) = resolved.first() {
                if id.contains('/') {
                    return self.follow_reference(id, scope);
                }
            }
        }

        Ok(resolved)
    }

    fn follow_reference(&self, id: &str, scope: &Scope) -> Result<BTreeSet<String>> {
        let nested = scope.deeper()?;
        let path = item::reference_path(id);
        let content = self
            .parser
            .provider()
            .read(&path)
            .map_err(|source| {
                scope.fail(Cause::Reference {
                    path: path.clone(),
                    source,
                })
            })?;

        tracing::debug!(filename = scope.origin, reference = %path, "Following table reference");
        let source = self.parser.table_in(&content, &path, &nested)?;
        Ok(source.all_items())
    }
}
