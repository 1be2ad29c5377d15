//! Node composition root.

use std::net::SocketAddr;
use std::sync::Arc;

use fcr_admin_server::{AdminServer, AdminServerConfig, ServerError};
use fcr_reputation::ReputationLedger;

use crate::handlers::register_handlers;
use crate::registration::Registration;

/// Owns the node's long-lived components.
///
/// Built once at start-up and passed to whatever needs it. Components that
/// outlive a borrow take the `Arc`s from the accessors.
#[derive(Debug, Clone)]
pub struct NodeContext {
    ledger: Arc<ReputationLedger>,
    registration: Arc<Registration>,
    admin: Arc<AdminServer>,
}

impl NodeContext {
    /// Builds every component and registers the admin handlers.
    pub fn new(config: &AdminServerConfig) -> Self {
        let ledger = Arc::new(ReputationLedger::default());
        let registration = Arc::new(Registration::new());
        let admin = Arc::new(AdminServer::new(config.clone()));

        register_handlers(&admin, &ledger, &registration);

        Self {
            ledger,
            registration,
            admin,
        }
    }

    pub fn ledger(&self) -> &Arc<ReputationLedger> {
        &self.ledger
    }

    pub fn registration(&self) -> &Arc<Registration> {
        &self.registration
    }

    pub fn admin(&self) -> &Arc<AdminServer> {
        &self.admin
    }

    pub async fn start(&self) -> Result<SocketAddr, ServerError> {
        self.admin.start().await
    }

    pub async fn shutdown(&self) {
        self.admin.shutdown().await;
    }
}
