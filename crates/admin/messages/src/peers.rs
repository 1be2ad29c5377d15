//! Peer reputation admin messages.

use fcr_reputation::{Record, Reputation};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Number of log entries returned when a request does not say.
pub const DEFAULT_INSPECT_RANGE: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPeersRequest {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPeersResponse {
    pub peers: Vec<Reputation>,
}

/// Request one peer's reputation and a page of its logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectPeerRequest {
    pub peer_id: String,
    #[serde(default)]
    pub from: usize,
    #[serde(default = "default_to")]
    pub to: usize,
}

fn default_to() -> usize {
    DEFAULT_INSPECT_RANGE
}

impl InspectPeerRequest {
    pub fn new(peer_id: impl Into<String>) -> Self {
        Self {
            peer_id: peer_id.into(),
            from: 0,
            to: DEFAULT_INSPECT_RANGE,
        }
    }
}

/// `reputation` is `None` for an untracked peer; the logs are then empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectPeerResponse {
    pub reputation: Option<Reputation>,
    #[serde(default)]
    pub history: Vec<Record>,
    #[serde(default)]
    pub violations: Vec<Record>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PeerStatus {
    Pend,
    Resume,
    Block,
    Unblock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePeerStatusRequest {
    pub peer_id: String,
    pub status: PeerStatus,
}
