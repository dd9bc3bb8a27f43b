//! Production path codec
//!
//! A production path is one concrete, branch-free way to obtain an item: the
//! chosen source for it, and recursively a path for each input that source
//! needs. Paths travel as a single URL query value:
//!
//! ```text
//! item>source~req1|req2|...
//! ```
//!
//! `~` separates a node's `item>source` head from its requirement block, `|`
//! separates sibling requirements, and `>` separates an item from its source.
//! Nested requirement blocks share the `|` delimiter with their parents, so a
//! nested node with more than one requirement does not survive a round trip
//! unchanged: its extra requirements come back as siblings of the outermost
//! one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Separates an item from its chosen source
pub const SOURCE_SEPARATOR: char = '>';

/// Separates a node's head from its requirement block
pub const REQUIREMENTS_SEPARATOR: char = '~';

/// Separates sibling requirements
pub const SIBLING_SEPARATOR: char = '|';

/// Deepest nesting [`ProductionPath::decode`] accepts
pub const MAX_DECODE_DEPTH: usize = 64;

/// A user-chosen resolution tree for one item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductionPath {
    pub item_id: String,
    /// Chosen source; `None` makes this a leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// One sub-path per input of the chosen source
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<ProductionPath>,
}

impl ProductionPath {
    /// A decision node
    ///
    /// An empty `source` makes a leaf, the same as decoding `item>`.
    pub fn new(
        item_id: impl Into<String>,
        source: impl Into<String>,
        requirements: Vec<ProductionPath>,
    ) -> Self {
        let source: String = source.into();
        Self {
            item_id: item_id.into(),
            source: (!source.is_empty()).then_some(source),
            requirements,
        }
    }

    /// An item with no further decision
    pub fn leaf(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            source: None,
            requirements: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.source.is_none()
    }

    /// Compact string form
    ///
    /// Leaves encode to the bare item id, dropping any requirements.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        self.encode_into(&mut out);
        out
    }

    fn encode_into(&self, out: &mut String) {
        out.push_str(&self.item_id);
        let Some(source) = &self.source else {
            return;
        };
        out.push(SOURCE_SEPARATOR);
        out.push_str(source);

        if self.requirements.is_empty() {
            return;
        }
        out.push(REQUIREMENTS_SEPARATOR);
        for (i, requirement) in self.requirements.iter().enumerate() {
            if i > 0 {
                out.push(SIBLING_SEPARATOR);
            }
            requirement.encode_into(out);
        }
    }

    /// Parse the compact string form
    ///
    /// Never fails loudly: blank or malformed input gives `None`, so this is
    /// safe to call on untrusted query parameters. Whitespace around ids and
    /// separators is ignored.
    pub fn decode(s: &str) -> Option<Self> {
        Self::decode_at(s, 0)
    }

    fn decode_at(s: &str, depth: usize) -> Option<Self> {
        let s = s.trim();
        if depth > MAX_DECODE_DEPTH || s.is_empty() {
            return None;
        }

        let (head, block) = match s.split_once(REQUIREMENTS_SEPARATOR) {
            Some((head, block)) => (head, Some(block)),
            None => (s, None),
        };
        let (item_id, source) = match head.split_once(SOURCE_SEPARATOR) {
            Some((item_id, source)) => (item_id.trim(), Some(source.trim())),
            None => (head.trim(), None),
        };
        if item_id.is_empty() {
            return None;
        }

        let requirements = match block {
            Some(block) => block
                .split(SIBLING_SEPARATOR)
                .map(|piece| Self::decode_at(piece, depth + 1))
                .collect::<Option<Vec<_>>>()?,
            None => Vec::new(),
        };

        Some(Self {
            item_id: item_id.to_string(),
            source: source.filter(|s| !s.is_empty()).map(str::to_string),
            requirements,
        })
    }

    /// Percent-encoded form for a URL query value
    pub fn to_query_value(&self) -> String {
        urlencoding::encode(&self.encode()).into_owned()
    }

    /// Parse a percent-encoded query value
    pub fn from_query_value(s: &str) -> Option<Self> {
        let decoded = urlencoding::decode(s).ok()?;
        Self::decode(&decoded)
    }

    /// Every item id in the tree, deduplicated
    pub fn get_all_item_ids(&self) -> BTreeSet<String> {
        let mut ids = BTreeSet::new();
        self.collect_item_ids(&mut ids);
        ids
    }

    fn collect_item_ids(&self, ids: &mut BTreeSet<String>) {
        ids.insert(self.item_id.clone());
        for requirement in &self.requirements {
            requirement.collect_item_ids(ids);
        }
    }

    /// Number of nodes with a chosen source
    pub fn count_decisions(&self) -> usize {
        let own = usize::from(self.source.is_some());
        own + self
            .requirements
            .iter()
            .map(ProductionPath::count_decisions)
            .sum::<usize>()
    }

    /// Whether the tree is fully resolved
    ///
    /// A decision with no declared requirements counts as complete.
    pub fn is_complete(&self) -> bool {
        if self.is_leaf() {
            return true;
        }
        self.requirements.is_empty() || self.requirements.iter().all(ProductionPath::is_complete)
    }
}

impl fmt::Display for ProductionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
