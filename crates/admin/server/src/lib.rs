//! Encrypted admin server for FCR nodes.
//!
//! The server accepts `POST /` requests whose body is a sealed admin frame
//! (see [`fcr_admin_codec`]), dispatches the payload to the handler
//! registered for the frame's message type, and answers with the handler's
//! response sealed under the same key.
//!
//! Failures are answered in cleartext with HTTP 400 and a
//! `{"Error": "<message>"}` body. A client that cannot authenticate never
//! receives anything it could decrypt.
//!
//! # Usage
//!
//! ```ignore
//! use fcr_admin_server::{AdminServer, AdminServerConfig};
//!
//! let server = AdminServer::new(AdminServerConfig {
//!     addr: "127.0.0.1:9010".into(),
//!     key: hex_key,
//!     ..Default::default()
//! });
//!
//! // All handlers must be registered before the first start.
//! server.add_handler(10, |payload: &[u8]| -> HandlerResult {
//!     Ok((11, payload.to_vec()))
//! });
//!
//! let addr = server.start().await?;
//! // ...
//! server.shutdown().await;
//! ```

mod config;
mod dispatch;
mod error;
mod handler;
mod server;

pub use config::{AdminServerConfig, DEFAULT_ADMIN_ADDR, DEFAULT_MAX_BODY_SIZE};
pub use error::{HandlerError, ServerError};
pub use handler::{AdminHandler, HandlerResult};
pub use server::AdminServer;
