//! Secure channel codec for the node admin plane.
//!
//! Admin frames are `[type:1][payload:N]` byte sequences sealed with
//! AES-256-GCM under a single shared [`AdminKey`]. Every seal draws a fresh
//! random nonce and carries it in front of the ciphertext:
//!
//! ```text
//! nonce(12) || ciphertext(1 + N) || tag(16)
//! ```
//!
//! All functions are pure and can be called concurrently without locking.

mod cipher;
mod error;
mod frame;
mod key;
mod message_type;

pub use cipher::{NONCE_SIZE, TAG_SIZE, decrypt, encrypt};
pub use error::{CodecError, VERIFY_FAILURE};
pub use frame::{Frame, MIN_SEALED_FRAME_SIZE, open_frame, seal_frame};
pub use key::{AdminKey, KEY_SIZE};
pub use message_type::MessageType;
