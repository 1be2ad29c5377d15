//! Admin handlers for node initialisation and peer reputation.
//!
//! Everything except initialisation is refused until registration completes.

use std::sync::Arc;

use fcr_admin_codec::MessageType;
use fcr_admin_messages::{
    Ack, ChangePeerStatusRequest, InitialisationRequest, InspectPeerRequest, InspectPeerResponse,
    ListPeersRequest, ListPeersResponse, MessageError, PeerStatus, decode, encode,
};
use fcr_admin_server::{AdminHandler, AdminServer, HandlerError, HandlerResult};
use fcr_reputation::ReputationLedger;
use serde::Serialize;
use tracing::{debug, info};

use crate::constants::NOT_INITIALISED;
use crate::registration::{NodeIdentity, Registration};

/// Register every node admin handler on `server`.
pub fn register_handlers(
    server: &AdminServer,
    ledger: &Arc<ReputationLedger>,
    registration: &Arc<Registration>,
) {
    server.add_handler(
        MessageType::Initialisation.as_u8(),
        InitialisationHandler {
            registration: Arc::clone(registration),
        },
    );

    let peers = PeerHandler {
        ledger: Arc::clone(ledger),
        registration: Arc::clone(registration),
    };
    server.add_handler(MessageType::ListPeersRequest.as_u8(), ListPeersHandler(peers.clone()));
    server.add_handler(
        MessageType::InspectPeerRequest.as_u8(),
        InspectPeerHandler(peers.clone()),
    );
    server.add_handler(
        MessageType::ChangePeerStatusRequest.as_u8(),
        ChangePeerStatusHandler(peers),
    );
}

fn reply<T: Serialize>(msg_type: MessageType, message: &T) -> HandlerResult {
    let data = encode(message).map_err(invalid)?;
    Ok((msg_type.as_u8(), data))
}

fn invalid(e: MessageError) -> HandlerError {
    HandlerError::new(e.to_string())
}

/// Accepts the node identity and moves registration to pending.
#[derive(Debug)]
pub struct InitialisationHandler {
    registration: Arc<Registration>,
}

impl AdminHandler for InitialisationHandler {
    fn handle(&self, payload: &[u8]) -> HandlerResult {
        let request: InitialisationRequest = decode(payload).map_err(invalid)?;
        let identity =
            NodeIdentity::new(request.node_id, request.private_key, request.key_version)
                .map_err(|e| HandlerError::new(e.to_string()))?;

        self.registration
            .initialise(identity)
            .map_err(|e| HandlerError::new(e.to_string()))?;

        reply(MessageType::Ack, &Ack::ok("initialisation accepted"))
    }
}

#[derive(Debug, Clone)]
struct PeerHandler {
    ledger: Arc<ReputationLedger>,
    registration: Arc<Registration>,
}

impl PeerHandler {
    fn ensure_registered(&self) -> Result<(), HandlerError> {
        if self.registration.is_registered() {
            Ok(())
        } else {
            Err(HandlerError::new(NOT_INITIALISED))
        }
    }
}

#[derive(Debug)]
pub struct ListPeersHandler(PeerHandler);

impl AdminHandler for ListPeersHandler {
    fn handle(&self, payload: &[u8]) -> HandlerResult {
        self.0.ensure_registered()?;
        let _: ListPeersRequest = decode(payload).map_err(invalid)?;

        let mut peers: Vec<_> = self
            .0
            .ledger
            .list_peers()
            .iter()
            .filter_map(|id| self.0.ledger.get_peer_reputation(id))
            .collect();
        peers.sort_by(|a, b| a.peer_id().cmp(b.peer_id()));

        debug!(count = peers.len(), "listing peers");
        reply(MessageType::ListPeersResponse, &ListPeersResponse { peers })
    }
}

#[derive(Debug)]
pub struct InspectPeerHandler(PeerHandler);

impl AdminHandler for InspectPeerHandler {
    fn handle(&self, payload: &[u8]) -> HandlerResult {
        self.0.ensure_registered()?;
        let request: InspectPeerRequest = decode(payload).map_err(invalid)?;
        let snapshot = self
            .0
            .ledger
            .inspect(&request.peer_id, request.from, request.to);

        let response = InspectPeerResponse {
            reputation: snapshot.reputation,
            history: snapshot.history,
            violations: snapshot.violations,
        };
        reply(MessageType::InspectPeerResponse, &response)
    }
}

#[derive(Debug)]
pub struct ChangePeerStatusHandler(PeerHandler);

impl AdminHandler for ChangePeerStatusHandler {
    fn handle(&self, payload: &[u8]) -> HandlerResult {
        self.0.ensure_registered()?;
        let request: ChangePeerStatusRequest = decode(payload).map_err(invalid)?;
        let ledger = &self.0.ledger;
        let id = request.peer_id.as_str();

        if !ledger.contains(id) {
            return Err(HandlerError::new(format!("peer not found: {id}")));
        }

        match request.status {
            PeerStatus::Pend => ledger.pend_peer(id),
            PeerStatus::Resume => ledger.resume_peer(id),
            PeerStatus::Block => ledger.block_peer(id),
            PeerStatus::Unblock => ledger.unblock_peer(id),
        }

        info!(peer_id = id, status = %request.status, "peer status changed by admin");
        reply(
            MessageType::Ack,
            &Ack::ok(format!("peer {id}: {}", request.status)),
        )
    }
}
