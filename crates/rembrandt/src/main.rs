mod cli;
mod commands;
mod compare;
mod config;
mod imaging;
mod report;
mod store;

use std::path::Path;

use clap::Parser;
use config::{CliOverrides, ResolvedRunConfig};
use store::Store;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rembrandt=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let root = Path::new(config::CONFIG_DIR);

    match cli.command {
        cli::Command::Init { force } => {
            commands::init(root, force)?;
        }
        cli::Command::Compare {
            reference,
            candidate,
            output,
            json,
            compare,
        } => {
            let overrides = CliOverrides {
                compare,
                parallel: None,
            };
            let config = ResolvedRunConfig::new(root, overrides)?;
            let code = commands::compare(
                &reference,
                &candidate,
                output.as_deref(),
                json,
                config.options,
            )?;
            std::process::exit(code);
        }
        cli::Command::Test {
            filter,
            parallel,
            compare,
        } => {
            let overrides = CliOverrides { compare, parallel };
            let config = ResolvedRunConfig::new(root, overrides)?;
            let code = commands::test(&Store::new(root), config, filter.as_deref()).await?;
            std::process::exit(code);
        }
        cli::Command::Approve {
            filter,
            new,
            failed,
            all,
        } => {
            let selection = commands::ApproveSelection {
                new_only: new,
                failed_only: failed,
                all,
            };
            commands::approve(&Store::new(root), filter.as_deref(), selection)?;
        }
        cli::Command::Review { open } => {
            commands::review(&Store::new(root), open)?;
        }
    }

    Ok(())
}
