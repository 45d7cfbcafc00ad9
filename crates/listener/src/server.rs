//! HTTP server for GitHub webhooks.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use labeler::{DeliveryId, EventTarget, TitleLabeler, Trigger, WebhookPayload};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::signature::{verify_signature, SIGNATURE_HEADER};
use crate::ListenerError;

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;

/// Route GitHub delivers webhooks to.
pub const WEBHOOK_PATH: &str = "/webhooks/github";

const EVENT_HEADER: &str = "X-GitHub-Event";
const DELIVERY_HEADER: &str = "X-GitHub-Delivery";

// GitHub caps payloads at 25 MB.
const MAX_PAYLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared state for the webhook routes.
pub struct WebhookState {
    /// Labeling service invoked for every triggering delivery.
    pub labeler: TitleLabeler,
    /// Webhook secret; when set, every delivery must carry a valid signature.
    pub secret: Option<String>,
}

/// Builds the HTTP router for the webhook listener.
pub fn build_router(state: WebhookState) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(handle_github_webhook))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(MAX_PAYLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves `router` until Ctrl-C is received.
///
/// # Errors
///
/// Returns [`ListenerError::Bind`] if the address cannot be bound and
/// [`ListenerError::Serve`] if the server fails while running.
pub async fn serve(addr: SocketAddr, router: Router) -> Result<(), ListenerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;
    info!(%addr, path = WEBHOOK_PATH, "Webhook listener started");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ListenerError::Serve)?;

    info!("Webhook listener stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn reply(status: StatusCode, body: serde_json::Value) -> Response {
    (status, Json(body)).into_response()
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Handles one GitHub webhook delivery.
async fn handle_github_webhook(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let delivery = header(&headers, DELIVERY_HEADER)
        .and_then(DeliveryId::parse)
        .unwrap_or_else(DeliveryId::new_random);

    if let Some(secret) = &state.secret {
        let valid = header(&headers, SIGNATURE_HEADER)
            .is_some_and(|signature| verify_signature(&body, signature, secret));
        if !valid {
            warn!(%delivery, "Rejected webhook with missing or invalid signature");
            return reply(
                StatusCode::UNAUTHORIZED,
                json!({ "status": "error", "error": "invalid signature" }),
            );
        }
    }

    let Some(event) = header(&headers, EVENT_HEADER) else {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "status": "error", "error": "missing X-GitHub-Event header" }),
        );
    };

    if event == "ping" {
        info!(%delivery, "Received ping");
        return reply(StatusCode::OK, json!({ "status": "pong" }));
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(%delivery, event, error = %e, "Failed to parse webhook payload");
            return reply(
                StatusCode::BAD_REQUEST,
                json!({ "status": "error", "error": format!("invalid payload: {e}") }),
            );
        }
    };

    let Some(trigger) = Trigger::from_delivery(event, payload.action.as_deref()) else {
        debug!(%delivery, event, action = ?payload.action, "Ignoring event");
        return reply(StatusCode::ACCEPTED, json!({ "status": "ignored" }));
    };

    let span = info_span!("delivery", %delivery, %trigger);
    async move {
        let target = match EventTarget::resolve(&payload) {
            Ok(target) => target,
            Err(e) => {
                info!(reason = %e, "Event has no labeling target; skipping");
                return reply(
                    StatusCode::ACCEPTED,
                    json!({ "status": "skipped", "reason": e.to_string() }),
                );
            }
        };

        match state.labeler.handle(&target).await {
            Ok(report) => reply(
                StatusCode::OK,
                json!({
                    "status": "labeled",
                    "target": report.target.to_string(),
                    "matched": report.matched,
                    "succeeded": report.succeeded(),
                    "failed": report.failed(),
                    "started_at": report.started_at.to_string(),
                }),
            ),
            Err(e) => reply(
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "status": "error", "error": e.to_string() }),
            ),
        }
    }
    .instrument(span)
    .await
}
