//! Node command - run a node with its admin server.
//!
//! This command:
//!
//! - Loads configuration from defaults, env, config file, and CLI
//! - Builds the node context and starts the admin server
//! - Completes registration once an operator has initialised the node
//! - Runs until Ctrl-C, then shuts the admin server down

use std::sync::Arc;

use clap::ArgMatches;
use eyre::{Result, WrapErr};
use fcr_node_core::{NodeContext, Registration, RegistrationPhase};
use fcr_reputation::LedgerEvent;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::cli::NodeArgs;
use crate::config::NodeConfig;

/// Run the node command.
pub async fn run(args: NodeArgs, matches: Option<&ArgMatches>) -> Result<()> {
    // Load configuration (defaults < env < config file), then CLI overrides
    let mut config = NodeConfig::load(args.config.as_deref())?;
    config.apply_cli(&args.admin, matches);
    debug!(?config, "configuration loaded");

    let context = NodeContext::new(&config.admin.server_config());
    let addr = context
        .start()
        .await
        .wrap_err("failed to start admin server")?;
    info!(%addr, "admin server listening");

    let registration_task = tokio::spawn(complete_registration(Arc::clone(
        context.registration(),
    )));
    let events_task = tokio::spawn(log_ledger_events(context.ledger().subscribe()));

    tokio::signal::ctrl_c()
        .await
        .wrap_err("failed to listen for shutdown signal")?;
    info!("Received shutdown signal");

    registration_task.abort();
    events_task.abort();
    context.shutdown().await;

    info!("node stopped");
    Ok(())
}

/// Waits for initialisation and acknowledges it.
///
/// Network registration is not part of this node, so there is nothing to
/// wait for between the two phases.
async fn complete_registration(registration: Arc<Registration>) {
    let mut phases = registration.subscribe();
    let phase = match phases
        .wait_for(|phase| *phase != RegistrationPhase::AwaitingInitialisation)
        .await
    {
        Ok(phase) => *phase,
        Err(_) => return,
    };

    if phase == RegistrationPhase::PendingRegistration {
        match registration.acknowledge() {
            Ok(()) => info!("registration acknowledged"),
            Err(e) => warn!(error = %e, "failed to acknowledge registration"),
        }
    }
}

async fn log_ledger_events(mut events: broadcast::Receiver<LedgerEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => debug!(?event, "ledger event"),
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "ledger event log lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use fcr_node_core::NodeIdentity;

    use super::*;

    #[tokio::test]
    async fn test_complete_registration() {
        let registration = Arc::new(Registration::new());
        let task = tokio::spawn(complete_registration(Arc::clone(&registration)));

        let identity = NodeIdentity::new("node", "abcd", 0).unwrap();
        registration.initialise(identity).unwrap();

        task.await.unwrap();
        assert!(registration.is_registered());
    }
}
