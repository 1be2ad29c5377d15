//! Constants used throughout the FCR node.

// =============================================================================
// Admin Server
// =============================================================================

/// Default bind address for the admin server (local-only).
pub const DEFAULT_ADMIN_ADDR: &str = fcr_admin_server::DEFAULT_ADMIN_ADDR;

/// Default upper bound on an admin request body, in bytes.
pub const DEFAULT_ADMIN_MAX_BODY_SIZE: usize = fcr_admin_server::DEFAULT_MAX_BODY_SIZE;

/// Environment variable holding the hex-encoded admin key.
pub const ADMIN_KEY_ENV: &str = "FCR_ADMIN_KEY";

// =============================================================================
// Configuration
// =============================================================================

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "FCR_";

// =============================================================================
// Admin Handlers
// =============================================================================

/// Handler error returned before the node has been registered.
pub const NOT_INITIALISED: &str = "node not initialised";
