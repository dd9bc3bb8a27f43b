//! Item identifier helpers
//!
//! Item ids are namespaced strings (`minecraft:diamond`). A leading `#` marks
//! a tag, a named group of interchangeable items (`#minecraft:logs`).

/// Namespace assumed when an id carries none
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Prefix marking a tag id
pub const TAG_PREFIX: char = '#';

/// Check whether an id names a tag rather than a single item
pub fn is_tag(id: &str) -> bool {
    id.starts_with(TAG_PREFIX)
}

/// Build a tag id from a bare tag name (`minecraft:logs` -> `#minecraft:logs`)
pub fn tag_id(tag: &str) -> String {
    if is_tag(tag) {
        tag.to_string()
    } else {
        format!("{}{}", TAG_PREFIX, tag)
    }
}

/// Namespace part of an id, ignoring any tag marker
///
/// "minecraft:oak_log" -> "minecraft", "#c:ores" -> "c", "stone" -> "minecraft"
pub fn namespace(id: &str) -> &str {
    let bare = id.trim_start_matches(TAG_PREFIX);
    match bare.split_once(':') {
        Some((ns, _)) if !ns.is_empty() => ns,
        _ => DEFAULT_NAMESPACE,
    }
}

/// Path part of an id, ignoring any tag marker
///
/// "minecraft:chests/igloo_chest" -> "chests/igloo_chest"
pub fn path(id: &str) -> &str {
    let bare = id.trim_start_matches(TAG_PREFIX);
    match bare.split_once(':') {
        Some((_, rest)) => rest,
        None => bare,
    }
}

/// File path a cross-file loot table reference points at
///
/// The leading namespace is stripped, any remaining `:` becomes `/` and
/// `.json` is appended: "minecraft:chests/igloo_chest" -> "chests/igloo_chest.json"
pub fn reference_path(id: &str) -> String {
    format!("{}.json", path(id).replace(':', "/"))
}

/// Fallback display name derived from the id itself
///
/// "minecraft:oak_planks" -> "Oak Planks", "#minecraft:logs" -> "Any Logs"
pub fn humanize(id: &str) -> String {
    let last = path(id).rsplit('/').next().unwrap_or_default();
    let words: Vec<String> = last
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    let name = words.join(" ");

    if is_tag(id) {
        format!("Any {}", name)
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_tag() {
        assert!(is_tag("#minecraft:logs"));
        assert!(!is_tag("minecraft:oak_log"));
    }

    #[test]
    fn test_tag_id_does_not_double_prefix() {
        assert_eq!(tag_id("minecraft:logs"), "#minecraft:logs");
        assert_eq!(tag_id("#minecraft:logs"), "#minecraft:logs");
    }

    #[test]
    fn test_namespace_and_path() {
        assert_eq!(namespace("minecraft:oak_log"), "minecraft");
        assert_eq!(namespace("#c:ores"), "c");
        assert_eq!(namespace("stone"), "minecraft");
        assert_eq!(path("minecraft:chests/igloo_chest"), "chests/igloo_chest");
        assert_eq!(path("#minecraft:logs"), "logs");
        assert_eq!(path("stone"), "stone");
    }

    #[test]
    fn test_reference_path() {
        assert_eq!(
            reference_path("minecraft:chests/igloo_chest"),
            "chests/igloo_chest.json"
        );
        assert_eq!(
            reference_path("minecraft:gameplay/fishing:junk"),
            "gameplay/fishing/junk.json"
        );
        assert_eq!(reference_path("blocks/stone"), "blocks/stone.json");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("minecraft:oak_planks"), "Oak Planks");
        assert_eq!(humanize("minecraft:diamond"), "Diamond");
        assert_eq!(humanize("#minecraft:logs"), "Any Logs");
        assert_eq!(humanize("minecraft:blocks/stone"), "Stone");
    }
}
