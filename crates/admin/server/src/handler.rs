use std::collections::HashMap;
use std::sync::Arc;

use crate::HandlerError;

/// Response message type and data, or a cleartext failure.
pub type HandlerResult = Result<(u8, Vec<u8>), HandlerError>;

/// Business logic for one admin message type.
///
/// Handlers are invoked concurrently from many requests and must guard any
/// shared state they touch themselves.
pub trait AdminHandler: Send + Sync + 'static {
    fn handle(&self, payload: &[u8]) -> HandlerResult;
}

impl<F> AdminHandler for F
where
    F: Fn(&[u8]) -> HandlerResult + Send + Sync + 'static,
{
    fn handle(&self, payload: &[u8]) -> HandlerResult {
        self(payload)
    }
}

pub(crate) type HandlerMap = HashMap<u8, Arc<dyn AdminHandler>>;
