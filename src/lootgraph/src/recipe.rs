//! Recipe parsing
//!
//! Recipes become sources whose required items are every ingredient and whose
//! produced item is the result. Ingredient and result shapes changed several
//! times between game versions; all of them are accepted.

use crate::error::{Cause, FileError, Result};
use crate::item;
use crate::resource::ResourceSource;
use crate::source_type::SourceType;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// An ingredient slot
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Ingredient {
    /// `"minecraft:stick"` or `"#minecraft:planks"`
    Id(String),
    /// `{"item": "minecraft:stick"}`
    Item { item: String },
    /// `{"tag": "minecraft:planks"}`
    Tag { tag: String },
    /// Any one of several ingredients
    AnyOf(Vec<Ingredient>),
    /// Unrecognized shape
    Other(Value),
}

impl Ingredient {
    /// Every id that satisfies this slot
    pub fn ids(&self) -> std::result::Result<BTreeSet<String>, Cause> {
        match self {
            Ingredient::Id(id) => Ok(BTreeSet::from([id.clone()])),
            Ingredient::Item { item } => Ok(BTreeSet::from([item.clone()])),
            Ingredient::Tag { tag } => Ok(BTreeSet::from([item::tag_id(tag)])),
            Ingredient::AnyOf(options) => {
                let mut ids = BTreeSet::new();
                for option in options {
                    ids.extend(option.ids()?);
                }
                Ok(ids)
            }
            Ingredient::Other(value) => Err(Cause::MalformedIngredient(value.to_string())),
        }
    }
}

/// A recipe's output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecipeResult {
    /// `"minecraft:iron_ingot"` (older cooking recipes)
    Id(String),
    /// `{"id": ..., "count": n}` or the older `{"item": ...}`
    Stack {
        #[serde(alias = "item")]
        id: String,
    },
}

impl RecipeResult {
    pub fn id(&self) -> &str {
        match self {
            RecipeResult::Id(id) => id,
            RecipeResult::Stack { id } => id,
        }
    }
}

/// A decoded recipe file
#[derive(Debug, Clone, PartialEq)]
pub enum Recipe {
    Shaped {
        key: BTreeMap<String, Ingredient>,
        result: Option<RecipeResult>,
    },
    Shapeless {
        ingredients: Vec<Ingredient>,
        result: Option<RecipeResult>,
    },
    Transmute {
        input: Option<Ingredient>,
        material: Option<Ingredient>,
        result: Option<RecipeResult>,
    },
    /// Stonecutting and the cooking family
    SingleInput {
        kind: SourceType,
        ingredient: Option<Ingredient>,
        result: Option<RecipeResult>,
    },
    Smithing {
        template: Option<Ingredient>,
        base: Option<Ingredient>,
        addition: Option<Ingredient>,
        result: Option<RecipeResult>,
    },
    /// Deliberately excluded kind
    Ignored(String),
    /// Unrecognized kind
    Unknown(String),
}

#[derive(Deserialize)]
struct ShapedBody {
    #[serde(default)]
    key: BTreeMap<String, Ingredient>,
    result: Option<RecipeResult>,
}

#[derive(Deserialize)]
struct ShapelessBody {
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    result: Option<RecipeResult>,
}

#[derive(Deserialize)]
struct TransmuteBody {
    input: Option<Ingredient>,
    material: Option<Ingredient>,
    result: Option<RecipeResult>,
}

#[derive(Deserialize)]
struct SingleInputBody {
    ingredient: Option<Ingredient>,
    result: Option<RecipeResult>,
}

#[derive(Deserialize)]
struct SmithingBody {
    template: Option<Ingredient>,
    base: Option<Ingredient>,
    addition: Option<Ingredient>,
    result: Option<RecipeResult>,
}

fn body<T: DeserializeOwned, E: de::Error>(map: Map<String, Value>) -> std::result::Result<T, E> {
    serde_json::from_value(Value::Object(map)).map_err(E::custom)
}

impl<'de> Deserialize<'de> for Recipe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        let kind = match map.remove("type") {
            Some(Value::String(kind)) => kind,
            Some(_) => return Err(de::Error::custom("recipe type must be a string")),
            None => return Err(de::Error::missing_field("type")),
        };

        let recipe = match SourceType::from_id(&kind) {
            SourceType::CraftingShaped => {
                let b = body::<ShapedBody, D::Error>(map)?;
                Recipe::Shaped {
                    key: b.key,
                    result: b.result,
                }
            }
            SourceType::CraftingShapeless => {
                let b = body::<ShapelessBody, D::Error>(map)?;
                Recipe::Shapeless {
                    ingredients: b.ingredients,
                    result: b.result,
                }
            }
            SourceType::CraftingTransmute => {
                let b = body::<TransmuteBody, D::Error>(map)?;
                Recipe::Transmute {
                    input: b.input,
                    material: b.material,
                    result: b.result,
                }
            }
            kind @ (SourceType::Stonecutting
            | SourceType::Smelting
            | SourceType::Smoking
            | SourceType::Blasting
            | SourceType::CampfireCooking) => {
                let b = body::<SingleInputBody, D::Error>(map)?;
                Recipe::SingleInput {
                    kind,
                    ingredient: b.ingredient,
                    result: b.result,
                }
            }
            SourceType::Smithing => {
                let b = body::<SmithingBody, D::Error>(map)?;
                Recipe::Smithing {
                    template: b.template,
                    base: b.base,
                    addition: b.addition,
                    result: b.result,
                }
            }
            SourceType::Ignored => Recipe::Ignored(kind),
            _ => Recipe::Unknown(kind),
        };

        Ok(recipe)
    }
}

fn required(slot: &Option<Ingredient>, field: &'static str) -> std::result::Result<BTreeSet<String>, Cause> {
    match slot {
        Some(ingredient) => ingredient.ids(),
        None => Err(Cause::MissingRecipeField(field)),
    }
}

fn result_id(result: &Option<RecipeResult>) -> std::result::Result<String, Cause> {
    result
        .as_ref()
        .map(|r| r.id().to_string())
        .ok_or(Cause::MissingRecipeField("result"))
}

impl Recipe {
    /// Kind of source this recipe becomes
    pub fn source_type(&self) -> SourceType {
        match self {
            Recipe::Shaped { .. } => SourceType::CraftingShaped,
            Recipe::Shapeless { .. } => SourceType::CraftingShapeless,
            Recipe::Transmute { .. } => SourceType::CraftingTransmute,
            Recipe::SingleInput { kind, .. } => *kind,
            Recipe::Smithing { .. } => SourceType::Smithing,
            Recipe::Ignored(_) => SourceType::Ignored,
            Recipe::Unknown(_) => SourceType::Unknown,
        }
    }

    /// Required and produced ids; `None` for ignored and unknown kinds
    fn io(&self) -> std::result::Result<Option<(BTreeSet<String>, String)>, Cause> {
        let mut inputs = BTreeSet::new();
        let output = match self {
            Recipe::Shaped { key, result } => {
                for ingredient in key.values() {
                    inputs.extend(ingredient.ids()?);
                }
                result_id(result)?
            }
            Recipe::Shapeless {
                ingredients,
                result,
            } => {
                for ingredient in ingredients {
                    inputs.extend(ingredient.ids()?);
                }
                result_id(result)?
            }
            Recipe::Transmute {
                input,
                material,
                result,
            } => {
                inputs.extend(required(input, "input")?);
                inputs.extend(required(material, "material")?);
                result_id(result)?
            }
            Recipe::SingleInput {
                ingredient, result, ..
            } => {
                inputs.extend(required(ingredient, "ingredient")?);
                result_id(result)?
            }
            Recipe::Smithing {
                template,
                base,
                addition,
                result,
            } => {
                // Legacy smithing has no template slot
                if let Some(template) = template {
                    inputs.extend(template.ids()?);
                }
                inputs.extend(required(base, "base")?);
                inputs.extend(required(addition, "addition")?);
                result_id(result)?
            }
            Recipe::Ignored(_) | Recipe::Unknown(_) => return Ok(None),
        };
        Ok(Some((inputs, output)))
    }
}

/// Parse recipe text into a source
///
/// Ignored kinds give `None`. Unknown kinds are logged and give a source
/// with no items.
pub fn parse_recipe(content: &str, filename: &str) -> Result<Option<ResourceSource>> {
    let fail = |cause: Cause| FileError::new(filename, cause);
    let recipe: Recipe = serde_json::from_str(content).map_err(|e| fail(Cause::Json(e)))?;

    match &recipe {
        Recipe::Ignored(kind) => {
            tracing::debug!(filename, recipe_type = %kind, "Skipping ignored recipe");
            return Ok(None);
        }
        Recipe::Unknown(kind) if SourceType::from_id(kind).is_loot_table() => {
            tracing::warn!(filename, recipe_type = %kind, "Loot table type in a recipe");
        }
        Recipe::Unknown(kind) => {
            tracing::warn!(filename, recipe_type = %kind, "Unknown recipe type");
        }
        _ => {}
    }

    let mut source = ResourceSource::new(recipe.source_type(), filename);
    if let Some((required, produced)) = recipe.io().map_err(fail)? {
        source.required = required;
        source.produced.insert(produced);
    }
    Ok(Some(source))
}
