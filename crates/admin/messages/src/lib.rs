//! Admin message payloads.
//!
//! Every payload is a JSON object. Unknown fields are ignored so either side
//! can add fields without breaking the other.

mod peers;

use std::fmt;

use fcr_admin_codec::MessageType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use peers::{
    ChangePeerStatusRequest, DEFAULT_INSPECT_RANGE, InspectPeerRequest, InspectPeerResponse,
    ListPeersRequest, ListPeersResponse, PeerStatus,
};

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("failed to encode message payload: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("malformed message payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("expected {expected} response, got {}", MessageType::label(*actual))]
    UnexpectedType { expected: MessageType, actual: u8 },
}

/// Serialize a payload to JSON bytes.
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, MessageError> {
    serde_json::to_vec(message).map_err(MessageError::Encode)
}

pub fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, MessageError> {
    Ok(serde_json::from_slice(payload)?)
}

/// Check that a response carries the expected type byte.
pub fn expect_type(expected: MessageType, actual: u8) -> Result<(), MessageError> {
    if expected.as_u8() == actual {
        Ok(())
    } else {
        Err(MessageError::UnexpectedType { expected, actual })
    }
}

/// First message from the operator: hands the node its identity.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialisationRequest {
    pub node_id: String,
    /// Hex-encoded signing key. Never logged.
    pub private_key: String,
    #[serde(default)]
    pub key_version: u32,
}

impl fmt::Debug for InitialisationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitialisationRequest")
            .field("node_id", &self.node_id)
            .field("private_key", &"[REDACTED]")
            .field("key_version", &self.key_version)
            .finish()
    }
}

/// Generic acknowledgement, sent with [`MessageType::Ack`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub ack: bool,
    #[serde(default)]
    pub message: String,
}

impl Ack {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            ack: true,
            message: message.into(),
        }
    }
}
