//! CLI commands for the FCR node.
//!
//! This crate provides the command-line interface:
//! - [`Cli`] - Top-level CLI parser
//! - [`Commands`] - Available subcommands
//! - [`NodeConfig`] - Figment-loaded node configuration
//!
//! Configuration is loaded using Figment with the following priority
//! (highest wins):
//!
//! 1. CLI arguments
//! 2. Config file (TOML)
//! 3. Environment variables (`FCR_` prefix)
//! 4. Defaults

mod cli;
pub mod commands;
pub mod config;

pub use cli::{AdminCommand, AdminOp, Cli, Commands, NodeArgs};
pub use config::NodeConfig;

use clap::{CommandFactory, FromArgMatches};
use color_eyre::eyre;
use fcr_node_core::logging;
use tracing::debug;

/// Run the FCR CLI with the process arguments.
///
/// This is the main entry point that should be called from the binary.
pub async fn run() -> eyre::Result<()> {
    // Setup error handling
    color_eyre::install()?;

    // Keep the raw matches so config loading can tell explicit CLI values
    // from clap defaults.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    logging::init_logging(&cli.logs)?;
    debug!(version = env!("CARGO_PKG_VERSION"), "starting fcr");

    match cli.command {
        Commands::Node(args) => {
            commands::node::run(args, matches.subcommand_matches("node")).await?;
        }
        Commands::Admin(command) => {
            commands::admin::run(command).await?;
        }
    }

    Ok(())
}
