//! Display names for item ids
//!
//! Names come from the game's English language file, where each item and
//! block has a translation key (`item.minecraft.oak_planks`). Ids without a
//! translation fall back to [`item::humanize`].
//!
//! The cache is filled once, before any concurrent extraction starts, and is
//! read-only afterwards: lookups never populate it.

use crate::item;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Errors loading a language file
#[derive(Debug, thiserror::Error)]
pub enum NamesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid language file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Item id -> display name
#[derive(Debug, Clone, Default)]
pub struct NameCache {
    names: HashMap<String, String>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a language file; a missing file gives an empty cache
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, NamesError> {
        let path = path.as_ref();
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "No language file, using fallback names");
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        let cache = Self::from_lang_json(&content)?;
        tracing::debug!(path = %path.display(), names = cache.len(), "Loaded language file");
        Ok(cache)
    }

    /// Build from language file text
    pub fn from_lang_json(content: &str) -> Result<Self, NamesError> {
        let translations: HashMap<String, String> = serde_json::from_str(content)?;
        Ok(Self::from_translations(translations))
    }

    /// Build from translation key/value pairs
    ///
    /// Item keys win over block keys for the same id (wall variants and
    /// placed forms sometimes differ from the held item's name).
    pub fn from_translations<I>(translations: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut items = HashMap::new();
        let mut blocks = HashMap::new();

        for (key, value) in translations {
            if let Some(id) = translation_id(&key, "item.") {
                items.insert(id, value);
            } else if let Some(id) = translation_id(&key, "block.") {
                blocks.insert(id, value);
            }
        }

        blocks.extend(items);
        Self { names: blocks }
    }

    /// Translated name, if the language file has one
    pub fn lookup(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Display name, falling back to one derived from the id
    pub fn get(&self, id: &str) -> String {
        if item::is_tag(id) {
            return item::humanize(id);
        }
        match self.lookup(id) {
            Some(name) => name.to_string(),
            None => item::humanize(id),
        }
    }

    /// Display names for a set of ids
    pub fn names_for<'a, I>(&self, ids: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter()
            .map(|id| (id.clone(), self.get(id)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// `item.minecraft.oak_planks` -> `minecraft:oak_planks`
///
/// Keys with further segments (`item.minecraft.potion.effect.water`) are
/// component names, not ids.
fn translation_id(key: &str, prefix: &str) -> Option<String> {
    let rest = key.strip_prefix(prefix)?;
    let (namespace, path) = rest.split_once('.')?;
    if namespace.is_empty() || path.is_empty() || path.contains('.') {
        return None;
    }
    Some(format!("{}:{}", namespace, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANG: &str = r#"{
        "block.minecraft.oak_planks": "Oak Planks",
        "block.minecraft.wheat": "Wheat Crops",
        "item.minecraft.wheat": "Wheat",
        "item.minecraft.potion.effect.water": "Water Bottle",
        "gui.done": "Done"
    }"#;

    #[test]
    fn test_translation_id() {
        assert_eq!(
            translation_id("item.minecraft.stick", "item."),
            Some("minecraft:stick".to_string())
        );
        assert_eq!(translation_id("item.minecraft.potion.effect.water", "item."), None);
        assert_eq!(translation_id("block.minecraft.stone", "item."), None);
        assert_eq!(translation_id("item.minecraft", "item."), None);
    }

    #[test]
    fn test_item_keys_win() {
        let cache = NameCache::from_lang_json(LANG).unwrap();
        assert_eq!(cache.get("minecraft:wheat"), "Wheat");
        assert_eq!(cache.get("minecraft:oak_planks"), "Oak Planks");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_fallback_names() {
        let cache = NameCache::from_lang_json(LANG).unwrap();
        assert_eq!(cache.lookup("minecraft:blue_wool"), None);
        assert_eq!(cache.get("minecraft:blue_wool"), "Blue Wool");
        assert_eq!(cache.get("#minecraft:logs"), "Any Logs");
    }

    #[test]
    fn test_names_for() {
        let cache = NameCache::from_lang_json(LANG).unwrap();
        let ids = ["minecraft:wheat".to_string(), "minecraft:stick".to_string()];
        let names = cache.names_for(&ids);
        assert_eq!(names["minecraft:wheat"], "Wheat");
        assert_eq!(names["minecraft:stick"], "Stick");
    }

    #[test]
    fn test_load_missing_file_is_empty() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let cache = NameCache::load(dir.path().join("en_us.json"))?;
        assert!(cache.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_invalid_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("en_us.json");
        std::fs::write(&path, "[1, 2")?;
        assert!(matches!(NameCache::load(&path), Err(NamesError::Json(_))));
        Ok(())
    }
}
