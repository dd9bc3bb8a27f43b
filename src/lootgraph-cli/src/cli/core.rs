//! Core CLI definitions

use clap::{Parser, Subcommand};
use lootgraph::{FailurePolicy, GameVersion};
use std::path::PathBuf;

use super::graph::GraphCommand;
use super::path::PathCommand;

#[derive(Parser)]
#[command(name = "lootgraph")]
#[command(about = "Minecraft resource production graph", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract loot tables and recipes into a sources manifest
    #[command(visible_alias = "x")]
    Extract {
        /// Game version, e.g. 1.21.4 (uses configured default if not provided)
        version: Option<GameVersion>,

        /// Directory holding one subdirectory per game version
        #[arg(long, env = "LOOTGRAPH_DATA_ROOT")]
        data_root: Option<PathBuf>,

        /// Output path for the manifest
        #[arg(short, long, default_value = "share/manifest/sources.json")]
        output: PathBuf,

        /// Files parsed at once
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,

        /// What to do when a file fails: skip or abort
        #[arg(long)]
        policy: Option<FailurePolicy>,
    },

    /// Query a sources manifest
    #[command(visible_alias = "g")]
    Graph {
        #[command(subcommand)]
        command: GraphCommand,
    },

    /// Encode and decode production paths
    #[command(visible_alias = "p")]
    Path {
        #[command(subcommand)]
        command: PathCommand,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default data root
        #[arg(long)]
        data_root: Option<PathBuf>,

        /// Set default game version
        #[arg(long)]
        default_version: Option<GameVersion>,

        /// Set default number of files parsed at once
        #[arg(long)]
        concurrency: Option<usize>,

        /// Set default failure policy (skip or abort)
        #[arg(long)]
        policy: Option<FailurePolicy>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
