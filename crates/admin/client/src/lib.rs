//! Client side of the encrypted admin channel.
//!
//! ```ignore
//! let client = AdminClient::new("127.0.0.1:9010", &hex_key)?;
//! let (resp_type, resp) = client.request(1, b"{}").await?;
//! ```

mod error;

use std::time::Duration;

use fcr_admin_codec::{AdminKey, VERIFY_FAILURE, open_frame, seal_frame};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, trace};

pub use error::ClientError;

/// Upper bound on one request round trip.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "Error")]
    error: String,
}

/// Reusable admin client bound to one server and key.
#[derive(Clone)]
pub struct AdminClient {
    url: String,
    key: AdminKey,
    http: reqwest::Client,
}

impl AdminClient {
    /// Creates a client for `addr` (`host:port` or a full URL).
    pub fn new(addr: &str, hex_key: &str) -> Result<Self, ClientError> {
        let key = AdminKey::from_hex(hex_key).map_err(ClientError::InvalidKey)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            url: normalize_url(addr),
            key,
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one sealed request and returns the opened response.
    pub async fn request(&self, msg_type: u8, payload: &[u8]) -> Result<(u8, Vec<u8>), ClientError> {
        let sealed = seal_frame(&self.key, msg_type, payload).map_err(ClientError::Encryption)?;

        trace!(url = %self.url, msg_type, "sending admin request");
        let response = self.http.post(&self.url).body(sealed).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        if body.len() <= 1 {
            return Err(ClientError::Protocol(format!(
                "response too short: {} bytes",
                body.len()
            )));
        }

        let frame = open_frame(&self.key, &body).map_err(ClientError::Decryption)?;
        debug!(msg_type, resp_type = frame.msg_type, "admin request completed");
        Ok(frame.into_parts())
    }
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// One-shot request with a fresh client.
pub async fn request(
    addr: &str,
    hex_key: &str,
    msg_type: u8,
    payload: &[u8],
) -> Result<(u8, Vec<u8>), ClientError> {
    AdminClient::new(addr, hex_key)?.request(msg_type, payload).await
}

fn normalize_url(addr: &str) -> String {
    if addr.starts_with("http://") || addr.starts_with("https://") {
        addr.to_string()
    } else {
        format!("http://{addr}")
    }
}

fn rejection(status: StatusCode, body: &[u8]) -> ClientError {
    let message = match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    };

    if status == StatusCode::BAD_REQUEST && message == VERIFY_FAILURE {
        return ClientError::Unauthenticated { message };
    }

    ClientError::Rejected {
        status: status.as_u16(),
        message,
    }
}
