//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up lootgraph CLI defaults.

use crate::config::Config;
use anyhow::Result;
use lootgraph::{FailurePolicy, GameVersion};
use std::path::PathBuf;

/// Settings passed on the command line
#[derive(Debug, Default)]
pub struct Changes {
    pub data_root: Option<PathBuf>,
    pub default_version: Option<GameVersion>,
    pub concurrency: Option<usize>,
    pub policy: Option<FailurePolicy>,
}

impl Changes {
    fn is_empty(&self) -> bool {
        self.data_root.is_none()
            && self.default_version.is_none()
            && self.concurrency.is_none()
            && self.policy.is_none()
    }

    fn apply(self, config: &mut Config) {
        if let Some(root) = self.data_root {
            config.data_root = Some(root);
        }
        if let Some(version) = self.default_version {
            config.default_version = Some(version);
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = Some(concurrency.max(1));
        }
        if let Some(policy) = self.policy {
            config.policy = Some(policy);
        }
    }
}

/// Handle the configure command
pub fn handle(changes: Changes, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if changes.is_empty() {
        show_usage();
        return Ok(());
    }

    changes.apply(&mut config);
    config.save()?;

    println!("Configuration updated");
    show_config(&config);
    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    match &config.data_root {
        Some(root) => println!("Data root:       {}", root.display()),
        None => println!("Data root:       (not set)"),
    }
    match config.default_version {
        Some(version) => println!("Default version: {}", version),
        None => println!("Default version: (not set)"),
    }
    println!("Concurrency:     {}", config.concurrency(None));
    println!("Failure policy:  {}", config.policy(None));

    if let Ok(path) = Config::config_path() {
        println!("Config file:     {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: lootgraph configure --data-root DIR --default-version 1.21.4");
    println!("   or: lootgraph configure --concurrency 8 --policy skip");
    println!("   or: lootgraph configure --show");
    println!();
    println!("The data root holds one directory per game version, each with the");
    println!("version's data/ and assets/ trees.");
}
