mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lootgraph=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            version,
            data_root,
            output,
            concurrency,
            policy,
        } => {
            commands::extract::handle(commands::extract::Request {
                version,
                data_root,
                output,
                concurrency,
                policy,
            })
            .await?;
        }

        Commands::Graph { command } => {
            commands::graph::handle(command)?;
        }

        Commands::Path { command } => {
            commands::path::handle(command)?;
        }

        Commands::Configure {
            data_root,
            default_version,
            concurrency,
            policy,
            show,
        } => {
            let changes = commands::configure::Changes {
                data_root,
                default_version,
                concurrency,
                policy,
            };
            commands::configure::handle(changes, show)?;
        }
    }

    Ok(())
}
