use fcr_admin_codec::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid admin key: {0}")]
    InvalidKey(#[source] CodecError),
    #[error("failed to seal request: {0}")]
    Encryption(#[source] CodecError),
    #[error("admin request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The server could not authenticate the request, usually a key mismatch.
    #[error("admin server rejected request: {message}")]
    Unauthenticated { message: String },
    #[error("admin server returned {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("failed to open response: {0}")]
    Decryption(#[source] CodecError),
}

impl ClientError {
    /// Returns true when the request or response failed authentication.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated { .. } | Self::Decryption(CodecError::Authentication)
        )
    }
}
