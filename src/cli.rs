// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stride")]
#[command(about = "Declarative app reconciliation for Marathon")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to stride.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new stride.yml configuration file
    Init {
        /// App id to put in the template
        #[arg(long)]
        id: Option<String>,

        /// Marathon URI to put in the template
        #[arg(long)]
        uri: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Reconcile the app to the requested state
    Apply {
        #[command(flatten)]
        target: Target,

        /// Requested state: present, absent, restart or kill
        #[arg(short, long)]
        state: Option<String>,

        /// Seconds to wait for the deployment (0 disables waiting)
        #[arg(short, long)]
        wait_timeout: Option<u64>,

        /// Override deployments that block an update or restart
        #[arg(short, long)]
        force: bool,
    },

    /// Show the app as Marathon currently sees it
    Status {
        #[command(flatten)]
        target: Target,
    },

    /// List stored versions of the app, newest first
    Versions {
        #[command(flatten)]
        target: Target,
    },

    /// Redeploy a stored version of the app
    Rollback {
        #[command(flatten)]
        target: Target,

        /// Version timestamp to restore (defaults to the previous version)
        #[arg(long)]
        version: Option<String>,

        /// Seconds to wait for the deployment (0 disables waiting)
        #[arg(short, long)]
        wait_timeout: Option<u64>,

        /// Override deployments that block the rollback
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args)]
pub struct Target {
    /// Target destination (defined in config)
    #[arg(short, long)]
    pub destination: Option<String>,
}
