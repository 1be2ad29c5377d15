//! Admin server CLI arguments.

use clap::Args;
use fcr_admin_server::AdminServerConfig;
use serde::{Deserialize, Serialize};

use crate::constants::{ADMIN_KEY_ENV, DEFAULT_ADMIN_ADDR, DEFAULT_ADMIN_MAX_BODY_SIZE};

/// Admin server configuration.
#[derive(Args, Clone, Serialize, Deserialize)]
#[command(next_help_heading = "Admin")]
#[serde(default, rename_all = "kebab-case")]
pub struct AdminArgs {
    /// Admin server listen address (`host:port`).
    #[arg(long = "admin.addr", default_value = DEFAULT_ADMIN_ADDR)]
    pub addr: String,

    /// Hex-encoded 32-byte admin key.
    #[arg(long = "admin.key", env = ADMIN_KEY_ENV, hide_env_values = true, default_value = "")]
    pub key: String,

    /// Maximum admin request body size in bytes.
    #[arg(long = "admin.max-body-size", default_value_t = DEFAULT_ADMIN_MAX_BODY_SIZE)]
    pub max_body_size: usize,
}

impl Default for AdminArgs {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADMIN_ADDR.to_string(),
            key: String::new(),
            max_body_size: DEFAULT_ADMIN_MAX_BODY_SIZE,
        }
    }
}

impl AdminArgs {
    pub fn server_config(&self) -> AdminServerConfig {
        AdminServerConfig {
            addr: self.addr.clone(),
            key: self.key.clone(),
            max_body_size: self.max_body_size,
        }
    }
}

impl std::fmt::Debug for AdminArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminArgs")
            .field("addr", &self.addr)
            .field("key", &"[REDACTED]")
            .field("max_body_size", &self.max_body_size)
            .finish()
    }
}
