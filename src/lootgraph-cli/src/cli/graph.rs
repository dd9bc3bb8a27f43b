//! CLI definitions for the graph command

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum GraphCommand {
    /// List the sources that can produce an item, best first
    Sources {
        /// Item id (e.g. "minecraft:stick", "stick", "#minecraft:logs")
        item: String,

        /// Path to sources manifest
        #[arg(long, default_value = "share/manifest/sources.json")]
        manifest: PathBuf,
    },

    /// List the sources that consume an item
    Uses {
        /// Item id
        item: String,

        /// Path to sources manifest
        #[arg(long, default_value = "share/manifest/sources.json")]
        manifest: PathBuf,
    },

    /// Show what one source requires and produces
    Source {
        /// Source key (e.g. "minecraft:crafting_shaped:stick.json")
        key: String,

        /// Path to sources manifest
        #[arg(long, default_value = "share/manifest/sources.json")]
        manifest: PathBuf,
    },

    /// Show node and edge counts
    Stats {
        /// Path to sources manifest
        #[arg(long, default_value = "share/manifest/sources.json")]
        manifest: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
