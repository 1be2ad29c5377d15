use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use fcr_admin_codec::AdminKey;
use parking_lot::RwLock;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::dispatch::{Dispatch, router};
use crate::handler::HandlerMap;
use crate::{AdminHandler, AdminServerConfig, ServerError};

enum ServerState {
    Stopped,
    Running {
        shutdown_tx: oneshot::Sender<()>,
        task: JoinHandle<()>,
    },
}

/// Encrypted admin server.
///
/// Handlers are registered by message type before the first [`start`](Self::start);
/// the table is frozen from then on. The server can be stopped and started
/// again any number of times, re-validating the key each time.
pub struct AdminServer {
    config: AdminServerConfig,
    handlers: RwLock<HandlerMap>,
    sealed: AtomicBool,
    running: AtomicBool,
    local_addr: RwLock<Option<SocketAddr>>,
    state: Mutex<ServerState>,
}

impl AdminServer {
    pub fn new(config: AdminServerConfig) -> Self {
        Self {
            config,
            handlers: RwLock::new(HandlerMap::new()),
            sealed: AtomicBool::new(false),
            running: AtomicBool::new(false),
            local_addr: RwLock::new(None),
            state: Mutex::new(ServerState::Stopped),
        }
    }

    pub fn config(&self) -> &AdminServerConfig {
        &self.config
    }

    /// Registers `handler` for `msg_type`, replacing any previous one.
    ///
    /// Ignored once the server has been started.
    pub fn add_handler<H: AdminHandler>(&self, msg_type: u8, handler: H) {
        let mut handlers = self.handlers.write();
        if self.sealed.load(Ordering::SeqCst) {
            warn!(msg_type, "admin server already started, ignoring handler registration");
            return;
        }
        if handlers.insert(msg_type, Arc::new(handler)).is_some() {
            debug!(msg_type, "replaced admin handler");
        }
    }

    pub fn has_handler(&self, msg_type: u8) -> bool {
        self.handlers.read().contains_key(&msg_type)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Binds the listener and starts serving in the background.
    ///
    /// Returns the bound address, which differs from the configured one when
    /// port `0` was requested.
    pub async fn start(&self) -> Result<SocketAddr, ServerError> {
        let mut state = self.state.lock().await;
        if matches!(*state, ServerState::Running { .. }) {
            return Err(ServerError::AlreadyStarted);
        }

        let key = AdminKey::from_hex(&self.config.key).map_err(ServerError::InvalidKey)?;

        let bind_err = |source| ServerError::Bind {
            addr: self.config.addr.clone(),
            source,
        };
        let listener = TcpListener::bind(&self.config.addr)
            .await
            .map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;

        let handlers = {
            let guard = self.handlers.read();
            self.sealed.store(true, Ordering::SeqCst);
            guard.clone()
        };
        let handler_count = handlers.len();

        let app = router(Dispatch::new(key, handlers), self.config.max_body_size);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    // A dropped sender also stops the server.
                    shutdown_rx.await.ok();
                })
                .await;
            if let Err(e) = result {
                error!(error = %e, "admin server error");
            }
        });

        *self.local_addr.write() = Some(local_addr);
        self.running.store(true, Ordering::SeqCst);
        *state = ServerState::Running { shutdown_tx, task };

        info!(addr = %local_addr, handlers = handler_count, "admin server started");
        Ok(local_addr)
    }

    /// Stops accepting connections and waits for in-flight requests.
    ///
    /// Does nothing when the server is not running.
    pub async fn shutdown(&self) {
        let mut state = self.state.lock().await;
        let ServerState::Running { shutdown_tx, task } =
            std::mem::replace(&mut *state, ServerState::Stopped)
        else {
            return;
        };

        info!("stopping admin server");
        shutdown_tx.send(()).ok();
        if let Err(e) = task.await {
            error!(error = %e, "admin server task failed");
        }

        self.running.store(false, Ordering::SeqCst);
        *self.local_addr.write() = None;
        info!("admin server stopped");
    }

    /// Address the server is currently bound to, if running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.read()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for AdminServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminServer")
            .field("config", &self.config)
            .field("handlers", &self.handler_count())
            .field("running", &self.is_running())
            .finish()
    }
}
