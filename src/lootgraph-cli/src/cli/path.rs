//! CLI definitions for the path command

use clap::Subcommand;

#[derive(Subcommand)]
pub enum PathCommand {
    /// Decode a production path string
    Decode {
        /// Encoded path (e.g. "minecraft:stick>minecraft:crafting_shaped")
        value: String,

        /// Input is a percent-encoded query value
        #[arg(long)]
        query: bool,

        /// Output the decoded tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode a production path given as JSON
    Encode {
        /// JSON tree: {"item_id": ..., "source": ..., "requirements": [...]}
        json: String,

        /// Also print the percent-encoded query value
        #[arg(long)]
        query: bool,
    },
}
