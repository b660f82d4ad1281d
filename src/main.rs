// ABOUTME: Entry point for the stride CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::ApplyOverrides;
use std::env;
use stride::config;
use stride::error::{Error, Result};
use stride::output::{Output, OutputMode};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbose flag
    let default = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = OutputMode::from_flags(cli.quiet, cli.json);

    let result = tokio::select! {
        result = run(cli, mode) => result,
        _ = tokio::signal::ctrl_c() => Err(Error::Interrupted),
    };

    if let Err(e) = result {
        Output::new(mode).error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mode: OutputMode) -> Result<()> {
    let output = Output::new(mode);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init { id, uri, force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, id.as_deref(), uri.as_deref(), force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Apply {
            target,
            state,
            wait_timeout,
            force,
        } => {
            let config = commands::load_config(config_path, target.destination.as_deref())?;
            let overrides = ApplyOverrides {
                state,
                wait_timeout,
                force,
            };
            commands::apply(config, overrides, output).await
        }
        Commands::Status { target } => {
            let config = commands::load_config(config_path, target.destination.as_deref())?;
            commands::status(config, output).await
        }
        Commands::Versions { target } => {
            let config = commands::load_config(config_path, target.destination.as_deref())?;
            commands::versions(config, output).await
        }
        Commands::Rollback {
            target,
            version,
            wait_timeout,
            force,
        } => {
            let config = commands::load_config(config_path, target.destination.as_deref())?;
            commands::rollback(config, version, wait_timeout, force, output).await
        }
    }
}
