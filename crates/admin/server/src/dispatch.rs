//! HTTP request handling: verify, dispatch, seal.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use fcr_admin_codec::{AdminKey, MessageType, VERIFY_FAILURE, open_frame, seal_frame};
use metrics::counter;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::HandlerError;
use crate::handler::HandlerMap;

/// Shared, immutable state for every request of one server run.
#[derive(Clone)]
pub(crate) struct Dispatch {
    key: Arc<AdminKey>,
    handlers: Arc<HandlerMap>,
}

impl Dispatch {
    pub(crate) fn new(key: AdminKey, handlers: HandlerMap) -> Self {
        Self {
            key: Arc::new(key),
            handlers: Arc::new(handlers),
        }
    }

    async fn process(&self, body: &[u8]) -> Result<Vec<u8>, Rejection> {
        if body.len() <= 1 {
            return Err(Rejection::Unverified);
        }

        let (msg_type, payload) = open_frame(&self.key, body)
            .map_err(|_| Rejection::Unverified)?
            .into_parts();

        let handler = self
            .handlers
            .get(&msg_type)
            .cloned()
            .ok_or(Rejection::UnsupportedType(msg_type))?;

        debug!(
            msg_type,
            name = MessageType::label(msg_type),
            len = payload.len(),
            "dispatching admin request"
        );

        // Handlers are synchronous; keep them off the async workers.
        let (resp_type, resp_data) = tokio::task::spawn_blocking(move || handler.handle(&payload))
            .await
            .map_err(|e| Rejection::Internal(format!("handler task failed: {e}")))?
            .map_err(Rejection::Handler)?;

        seal_frame(&self.key, resp_type, &resp_data)
            .map_err(|e| Rejection::Internal(e.to_string()))
    }
}

pub(crate) fn router(dispatch: Dispatch, max_body_size: usize) -> Router {
    Router::new()
        .route("/", post(handle_request))
        .with_state(dispatch)
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
}

async fn handle_request(
    State(dispatch): State<Dispatch>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    counter!("admin.requests_total").increment(1);

    let result = match body {
        Ok(body) => dispatch.process(&body).await,
        Err(rejection) => Err(Rejection::Body(rejection)),
    };

    match result {
        Ok(sealed) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            sealed,
        )
            .into_response(),
        Err(rejection) => {
            counter!("admin.requests_rejected_total", "reason" => rejection.reason()).increment(1);
            error!(reason = rejection.reason(), message = %rejection.message(), "rejected admin request");
            rejection.into_response()
        }
    }
}

/// Why a request was refused. Never carries payload bytes.
#[derive(Debug)]
enum Rejection {
    /// Too short, tampered, or sealed under another key.
    Unverified,
    UnsupportedType(u8),
    Handler(HandlerError),
    Body(BytesRejection),
    Internal(String),
}

impl Rejection {
    fn reason(&self) -> &'static str {
        match self {
            Self::Unverified => "verify",
            Self::UnsupportedType(_) => "unsupported_type",
            Self::Handler(_) => "handler",
            Self::Body(_) => "body",
            Self::Internal(_) => "internal",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Unverified => VERIFY_FAILURE.to_string(),
            Self::UnsupportedType(msg_type) => format!("unsupported message type: {msg_type}"),
            Self::Handler(e) => e.message().to_string(),
            Self::Body(e) => e.body_text(),
            Self::Internal(message) => message.clone(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Body(e) => e.status(),
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "Error": self.message() });
        (self.status(), Json(body)).into_response()
    }
}
