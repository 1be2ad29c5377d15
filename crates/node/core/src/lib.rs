//! FCR node infrastructure.
//!
//! - [`args`] - CLI argument structs that double as config sections
//! - [`context`] - the node's composition root
//! - [`handlers`] - admin handlers for peer reputation and initialisation
//! - [`logging`] - logging initialization
//! - [`registration`] - two-phase registration state machine

pub mod args;
pub mod constants;
pub mod context;
pub mod handlers;
pub mod logging;
pub mod registration;

pub use context::NodeContext;
pub use registration::{NodeIdentity, Registration, RegistrationError, RegistrationPhase};
