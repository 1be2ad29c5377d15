//! CLI argument assembly and top-level parser.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fcr_admin_messages::{DEFAULT_INSPECT_RANGE, PeerStatus};
use fcr_node_core::constants::{ADMIN_KEY_ENV, DEFAULT_ADMIN_ADDR};

pub use fcr_node_core::args::{AdminArgs, LogArgs};

/// FCR - retrieval node with an encrypted admin channel
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Logging configuration.
    #[command(flatten)]
    pub logs: LogArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a node.
    Node(NodeArgs),
    /// Send an admin request to a running node.
    Admin(AdminCommand),
}

/// Arguments for the 'node' command.
#[derive(Debug, Args)]
pub struct NodeArgs {
    /// Path to a TOML config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Admin server configuration.
    #[command(flatten)]
    pub admin: AdminArgs,
}

/// Arguments for the 'admin' command.
#[derive(Debug, Args)]
pub struct AdminCommand {
    /// Admin server address.
    #[arg(long, default_value = DEFAULT_ADMIN_ADDR)]
    pub addr: String,

    /// Hex-encoded 32-byte admin key.
    #[arg(long, env = ADMIN_KEY_ENV, hide_env_values = true)]
    pub key: Option<String>,

    #[command(subcommand)]
    pub op: AdminOp,
}

#[derive(Debug, Subcommand)]
pub enum AdminOp {
    /// Hand the node its identity.
    Init {
        #[arg(long)]
        node_id: String,
        /// Hex-encoded private key.
        #[arg(long)]
        private_key: String,
        #[arg(long, default_value_t = 0)]
        key_version: u32,
    },
    /// List tracked peers and their reputations.
    ListPeers,
    /// Show one peer's reputation, history and violations.
    InspectPeer {
        peer_id: String,
        #[arg(long, default_value_t = 0)]
        from: usize,
        #[arg(long, default_value_t = DEFAULT_INSPECT_RANGE)]
        to: usize,
    },
    /// Pend, resume, block or unblock a peer.
    ChangePeerStatus {
        peer_id: String,
        /// One of: pend, resume, block, unblock.
        status: PeerStatus,
    },
    /// Print a fresh random admin key.
    GenerateKey,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_asserts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_admin_change_status() {
        let cli = Cli::try_parse_from([
            "fcr",
            "admin",
            "--key",
            "00",
            "change-peer-status",
            "peer-1",
            "block",
        ])
        .unwrap();

        let Commands::Admin(admin) = cli.command else {
            panic!("expected admin command");
        };
        assert_eq!(admin.addr, DEFAULT_ADMIN_ADDR);
        assert!(matches!(
            admin.op,
            AdminOp::ChangePeerStatus { ref peer_id, status: PeerStatus::Block } if peer_id == "peer-1"
        ));
    }

    #[test]
    fn test_parse_node_with_verbosity() {
        let cli = Cli::try_parse_from(["fcr", "-vv", "node", "--admin.addr", "0.0.0.0:1"]).unwrap();
        assert_eq!(cli.logs.verbosity, 2);
        let Commands::Node(args) = cli.command else {
            panic!("expected node command");
        };
        assert_eq!(args.admin.addr, "0.0.0.0:1");
        assert!(args.config.is_none());
    }
}
