use thiserror::Error;

/// Generic message for every request the channel cannot authenticate.
///
/// Tampered, truncated and wrong-key input all map to this one string.
pub const VERIFY_FAILURE: &str = "request fails to verify";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
    #[error("invalid key encoding: expected hex")]
    InvalidKeyHex,
    #[error("encryption failed")]
    Encryption,
    #[error("{}", VERIFY_FAILURE)]
    Authentication,
    #[error("frame carries no message type")]
    EmptyFrame,
}

impl CodecError {
    /// Returns true if the error comes from a malformed key rather than from data.
    pub fn is_key_error(&self) -> bool {
        matches!(self, Self::InvalidKeyLength { .. } | Self::InvalidKeyHex)
    }
}
