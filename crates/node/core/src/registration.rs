//! Two-phase node registration.
//!
//! An operator initialises the node with its identity, which moves it to
//! [`RegistrationPhase::PendingRegistration`]. Start-up code completes its
//! own registration work and then calls [`Registration::acknowledge`]. Peer
//! admin operations are refused until then.

use std::fmt;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;
use tracing::info;

/// Identity handed to the node by the initialisation request.
#[derive(Clone, PartialEq, Eq)]
pub struct NodeIdentity {
    node_id: String,
    private_key: String,
    key_version: u32,
}

impl NodeIdentity {
    /// Validates that `node_id` is non-empty and `private_key` is non-empty hex.
    pub fn new(
        node_id: impl Into<String>,
        private_key: impl Into<String>,
        key_version: u32,
    ) -> Result<Self, RegistrationError> {
        let node_id = node_id.into();
        let private_key = private_key.into();

        if node_id.trim().is_empty() {
            return Err(RegistrationError::InvalidIdentity("empty node id".into()));
        }
        let key_hex = private_key.strip_prefix("0x").unwrap_or(&private_key);
        if key_hex.is_empty() || hex::decode(key_hex).is_err() {
            return Err(RegistrationError::InvalidIdentity(
                "private key must be non-empty hex".into(),
            ));
        }

        Ok(Self {
            node_id,
            private_key,
            key_version,
        })
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    pub fn key_version(&self) -> u32 {
        self.key_version
    }
}

impl fmt::Debug for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeIdentity")
            .field("node_id", &self.node_id)
            .field("private_key", &"[REDACTED]")
            .field("key_version", &self.key_version)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationPhase {
    AwaitingInitialisation,
    PendingRegistration,
    Registered,
}

impl fmt::Display for RegistrationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AwaitingInitialisation => "awaiting initialisation",
            Self::PendingRegistration => "pending registration",
            Self::Registered => "registered",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("node already initialised ({0})")]
    AlreadyInitialised(RegistrationPhase),
    #[error("registration is not pending ({0})")]
    NotPending(RegistrationPhase),
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),
}

#[derive(Debug)]
enum State {
    AwaitingInitialisation,
    PendingRegistration(NodeIdentity),
    Registered(NodeIdentity),
}

impl State {
    fn phase(&self) -> RegistrationPhase {
        match self {
            Self::AwaitingInitialisation => RegistrationPhase::AwaitingInitialisation,
            Self::PendingRegistration(_) => RegistrationPhase::PendingRegistration,
            Self::Registered(_) => RegistrationPhase::Registered,
        }
    }

    fn identity(&self) -> Option<&NodeIdentity> {
        match self {
            Self::AwaitingInitialisation => None,
            Self::PendingRegistration(identity) | Self::Registered(identity) => Some(identity),
        }
    }
}

/// Registration state shared between admin handlers and start-up code.
#[derive(Debug)]
pub struct Registration {
    state: Mutex<State>,
    phase_tx: watch::Sender<RegistrationPhase>,
}

impl Default for Registration {
    fn default() -> Self {
        Self::new()
    }
}

impl Registration {
    pub fn new() -> Self {
        let (phase_tx, _) = watch::channel(RegistrationPhase::AwaitingInitialisation);
        Self {
            state: Mutex::new(State::AwaitingInitialisation),
            phase_tx,
        }
    }

    /// Accepts the node identity. Only valid before any initialisation.
    pub fn initialise(&self, identity: NodeIdentity) -> Result<(), RegistrationError> {
        let mut state = self.state.lock();
        if !matches!(*state, State::AwaitingInitialisation) {
            return Err(RegistrationError::AlreadyInitialised(state.phase()));
        }

        info!(node_id = identity.node_id(), "node initialised, registration pending");
        *state = State::PendingRegistration(identity);
        self.phase_tx.send_replace(RegistrationPhase::PendingRegistration);
        Ok(())
    }

    /// Completes registration. Only valid while pending.
    pub fn acknowledge(&self) -> Result<(), RegistrationError> {
        let mut state = self.state.lock();
        let identity = match std::mem::replace(&mut *state, State::AwaitingInitialisation) {
            State::PendingRegistration(identity) => identity,
            other => {
                let phase = other.phase();
                *state = other;
                return Err(RegistrationError::NotPending(phase));
            }
        };

        info!(node_id = identity.node_id(), "node registered");
        *state = State::Registered(identity);
        self.phase_tx.send_replace(RegistrationPhase::Registered);
        Ok(())
    }

    pub fn phase(&self) -> RegistrationPhase {
        self.state.lock().phase()
    }

    pub fn is_registered(&self) -> bool {
        self.phase() == RegistrationPhase::Registered
    }

    pub fn identity(&self) -> Option<NodeIdentity> {
        self.state.lock().identity().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<RegistrationPhase> {
        self.phase_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> NodeIdentity {
        NodeIdentity::new("node-1", "0xdeadbeef", 1).unwrap()
    }

    #[test]
    fn test_identity_validation() {
        assert!(NodeIdentity::new("", "abcd", 0).is_err());
        assert!(NodeIdentity::new("n", "", 0).is_err());
        assert!(NodeIdentity::new("n", "0x", 0).is_err());
        assert!(NodeIdentity::new("n", "xyz", 0).is_err());
        assert!(NodeIdentity::new("n", "abcd", 0).is_ok());
    }

    #[test]
    fn test_identity_debug_redacts_key() {
        let debug = format!("{:?}", identity());
        assert!(debug.contains("node-1"));
        assert!(!debug.contains("deadbeef"));
    }

    #[test]
    fn test_happy_path() {
        let registration = Registration::new();
        assert_eq!(registration.phase(), RegistrationPhase::AwaitingInitialisation);
        assert!(registration.identity().is_none());

        registration.initialise(identity()).unwrap();
        assert_eq!(registration.phase(), RegistrationPhase::PendingRegistration);
        assert!(!registration.is_registered());

        registration.acknowledge().unwrap();
        assert!(registration.is_registered());
        assert_eq!(registration.identity().unwrap().node_id(), "node-1");
    }

    #[test]
    fn test_second_initialisation_rejected() {
        let registration = Registration::new();
        registration.initialise(identity()).unwrap();
        assert_eq!(
            registration.initialise(identity()),
            Err(RegistrationError::AlreadyInitialised(
                RegistrationPhase::PendingRegistration
            ))
        );

        registration.acknowledge().unwrap();
        assert_eq!(
            registration.initialise(identity()),
            Err(RegistrationError::AlreadyInitialised(RegistrationPhase::Registered))
        );
    }

    #[test]
    fn test_acknowledge_outside_pending_rejected() {
        let registration = Registration::new();
        assert_eq!(
            registration.acknowledge(),
            Err(RegistrationError::NotPending(
                RegistrationPhase::AwaitingInitialisation
            ))
        );

        registration.initialise(identity()).unwrap();
        registration.acknowledge().unwrap();
        assert_eq!(
            registration.acknowledge(),
            Err(RegistrationError::NotPending(RegistrationPhase::Registered))
        );
        assert!(registration.is_registered());
        assert!(registration.identity().is_some());
    }

    #[tokio::test]
    async fn test_subscribe_observes_phases() {
        let registration = Registration::new();
        let mut rx = registration.subscribe();
        assert_eq!(*rx.borrow(), RegistrationPhase::AwaitingInitialisation);

        registration.initialise(identity()).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), RegistrationPhase::PendingRegistration);

        registration.acknowledge().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), RegistrationPhase::Registered);
    }
}
