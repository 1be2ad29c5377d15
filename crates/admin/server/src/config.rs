use std::fmt;

/// Default listen address for the admin server (local-only).
pub const DEFAULT_ADMIN_ADDR: &str = "127.0.0.1:9010";

/// Default upper bound for a request body, in bytes.
pub const DEFAULT_MAX_BODY_SIZE: usize = 64 * 1024 * 1024;

/// Configuration for the admin server.
#[derive(Clone)]
pub struct AdminServerConfig {
    /// Address to bind to (`host:port`). Port `0` picks a free port.
    pub addr: String,
    /// Hex-encoded 32-byte shared key. Validated on every start.
    pub key: String,
    /// Maximum accepted request body size.
    pub max_body_size: usize,
}

impl Default for AdminServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADMIN_ADDR.to_string(),
            key: String::new(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl AdminServerConfig {
    pub fn new(addr: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            key: key.into(),
            ..Default::default()
        }
    }
}

impl fmt::Debug for AdminServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminServerConfig")
            .field("addr", &self.addr)
            .field("key", &"[REDACTED]")
            .field("max_body_size", &self.max_body_size)
            .finish()
    }
}
