//! Peer reputation ledger.
//!
//! Tracks a signed score, pending and blocked flags, and newest-first
//! history and violation logs for every peer the node has chosen to track.
//! All state lives behind one reader/writer lock, so every read observes a
//! consistent snapshot across scores, logs and flag indexes.

pub mod catalogue;
mod events;
mod ledger;
mod record;
mod reputation;

pub use events::LedgerEvent;
pub use ledger::{LedgerConfig, PeerSnapshot, ReputationLedger};
pub use record::Record;
pub use reputation::Reputation;
