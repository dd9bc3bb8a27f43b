//! CLI argument definitions for lootgraph
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;
mod graph;
mod path;

pub use core::{Cli, Commands};
pub use graph::GraphCommand;
pub use path::PathCommand;
