//! CLI argument structs for node configuration.
//!
//! These args serve dual purposes:
//! - CLI parsing via clap (`#[derive(Args)]`)
//! - Configuration serialization via serde (`#[derive(Serialize, Deserialize)]`)

mod admin;
mod log;

pub use admin::AdminArgs;
pub use log::LogArgs;
