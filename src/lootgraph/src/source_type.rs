//! Source type catalog
//!
//! Every loot table and recipe file is classified by its top-level `type`
//! into one of a closed set of kinds. The preference score only ranks
//! sources for display; it never affects graph structure.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Recipe kinds that are recognized but deliberately kept out of the graph
const IGNORED_RECIPE_PREFIXES: &[&str] = &["crafting_special_"];
const IGNORED_RECIPES: &[&str] = &["crafting_decorated_pot", "smithing_trim"];

/// Kind of mechanism a source file describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceType {
    BlockBreak,
    EntityKill,
    Shearing,
    Barter,
    Fishing,
    Chest,
    Archaeology,
    Equipment,
    Gift,
    CraftingShaped,
    CraftingShapeless,
    CraftingTransmute,
    Stonecutting,
    Smelting,
    Smoking,
    Blasting,
    CampfireCooking,
    Smithing,
    /// Type id not in the catalog
    Unknown,
    /// Recipe kind excluded on purpose (special crafting, trims)
    Ignored,
}

impl SourceType {
    /// Every catalog entry, sentinels last
    pub const ALL: &'static [SourceType] = &[
        SourceType::BlockBreak,
        SourceType::EntityKill,
        SourceType::Shearing,
        SourceType::Barter,
        SourceType::Fishing,
        SourceType::Chest,
        SourceType::Archaeology,
        SourceType::Equipment,
        SourceType::Gift,
        SourceType::CraftingShaped,
        SourceType::CraftingShapeless,
        SourceType::CraftingTransmute,
        SourceType::Stonecutting,
        SourceType::Smelting,
        SourceType::Smoking,
        SourceType::Blasting,
        SourceType::CampfireCooking,
        SourceType::Smithing,
        SourceType::Unknown,
        SourceType::Ignored,
    ];

    /// Resolve a `type` value from a loot table or recipe file
    ///
    /// Accepts namespaced (`minecraft:block`) and bare (`block`) ids.
    pub fn from_id(id: &str) -> Self {
        let bare = id.strip_prefix("minecraft:").unwrap_or(id);

        if IGNORED_RECIPES.contains(&bare)
            || IGNORED_RECIPE_PREFIXES.iter().any(|p| bare.starts_with(p))
        {
            return SourceType::Ignored;
        }

        match bare {
            "block" => SourceType::BlockBreak,
            "entity" => SourceType::EntityKill,
            "shearing" => SourceType::Shearing,
            "barter" => SourceType::Barter,
            "fishing" => SourceType::Fishing,
            "chest" => SourceType::Chest,
            "archaeology" => SourceType::Archaeology,
            "equipment" => SourceType::Equipment,
            "gift" => SourceType::Gift,
            "crafting_shaped" => SourceType::CraftingShaped,
            "crafting_shapeless" => SourceType::CraftingShapeless,
            "crafting_transmute" => SourceType::CraftingTransmute,
            "stonecutting" => SourceType::Stonecutting,
            "smelting" => SourceType::Smelting,
            "smoking" => SourceType::Smoking,
            "blasting" => SourceType::Blasting,
            "campfire_cooking" => SourceType::CampfireCooking,
            "smithing" | "smithing_transform" => SourceType::Smithing,
            "unknown" => SourceType::Unknown,
            "ignored" => SourceType::Ignored,
            _ => SourceType::Unknown,
        }
    }

    /// Stable id, used in source node keys and manifests
    pub fn id(&self) -> &'static str {
        match self {
            SourceType::BlockBreak => "minecraft:block",
            SourceType::EntityKill => "minecraft:entity",
            SourceType::Shearing => "minecraft:shearing",
            SourceType::Barter => "minecraft:barter",
            SourceType::Fishing => "minecraft:fishing",
            SourceType::Chest => "minecraft:chest",
            SourceType::Archaeology => "minecraft:archaeology",
            SourceType::Equipment => "minecraft:equipment",
            SourceType::Gift => "minecraft:gift",
            SourceType::CraftingShaped => "minecraft:crafting_shaped",
            SourceType::CraftingShapeless => "minecraft:crafting_shapeless",
            SourceType::CraftingTransmute => "minecraft:crafting_transmute",
            SourceType::Stonecutting => "minecraft:stonecutting",
            SourceType::Smelting => "minecraft:smelting",
            SourceType::Smoking => "minecraft:smoking",
            SourceType::Blasting => "minecraft:blasting",
            SourceType::CampfireCooking => "minecraft:campfire_cooking",
            SourceType::Smithing => "minecraft:smithing",
            SourceType::Unknown => "unknown",
            SourceType::Ignored => "ignored",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            SourceType::BlockBreak => "Breaking",
            SourceType::EntityKill => "Mob Drop",
            SourceType::Shearing => "Shearing",
            SourceType::Barter => "Bartering",
            SourceType::Fishing => "Fishing",
            SourceType::Chest => "Chest Loot",
            SourceType::Archaeology => "Archaeology",
            SourceType::Equipment => "Mob Equipment",
            SourceType::Gift => "Gift",
            SourceType::CraftingShaped => "Crafting",
            SourceType::CraftingShapeless => "Shapeless Crafting",
            SourceType::CraftingTransmute => "Transmute Crafting",
            SourceType::Stonecutting => "Stonecutting",
            SourceType::Smelting => "Smelting",
            SourceType::Smoking => "Smoking",
            SourceType::Blasting => "Blasting",
            SourceType::CampfireCooking => "Campfire Cooking",
            SourceType::Smithing => "Smithing",
            SourceType::Unknown => "Unknown",
            SourceType::Ignored => "Ignored",
        }
    }

    /// Display ranking score, higher sorts first
    pub fn preference(&self) -> i32 {
        match self {
            SourceType::CraftingShaped => 100,
            SourceType::CraftingShapeless => 95,
            SourceType::Smelting => 90,
            SourceType::BlockBreak => 88,
            SourceType::Stonecutting => 85,
            SourceType::CraftingTransmute => 80,
            SourceType::Smithing => 75,
            SourceType::Blasting => 70,
            SourceType::Smoking => 70,
            SourceType::EntityKill => 65,
            SourceType::CampfireCooking => 60,
            SourceType::Shearing => 60,
            SourceType::Barter => 40,
            SourceType::Fishing => 35,
            SourceType::Chest => 30,
            SourceType::Archaeology => 25,
            SourceType::Equipment => 20,
            SourceType::Gift => 15,
            SourceType::Unknown => 0,
            SourceType::Ignored => -100,
        }
    }

    /// Whether this kind comes from a recipe file
    pub fn is_recipe(&self) -> bool {
        matches!(
            self,
            SourceType::CraftingShaped
                | SourceType::CraftingShapeless
                | SourceType::CraftingTransmute
                | SourceType::Stonecutting
                | SourceType::Smelting
                | SourceType::Smoking
                | SourceType::Blasting
                | SourceType::CampfireCooking
                | SourceType::Smithing
        )
    }

    /// Whether this kind comes from a loot table file
    pub fn is_loot_table(&self) -> bool {
        matches!(
            self,
            SourceType::BlockBreak
                | SourceType::EntityKill
                | SourceType::Shearing
                | SourceType::Barter
                | SourceType::Fishing
                | SourceType::Chest
                | SourceType::Archaeology
                | SourceType::Equipment
                | SourceType::Gift
        )
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for SourceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for SourceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Ok(SourceType::from_id(&id))
    }
}
