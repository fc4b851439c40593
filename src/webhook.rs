//! Webhook mode - receives pushes from the indexing service.
//!
//! The payload is logged but never interpreted: every POST produces the same
//! acknowledgment alert and the same `200 {"status":"ok"}` answer.

use crate::alerts::{webhook_ack_message, AlertSink};
use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Clone)]
struct WebhookState {
    sink: Arc<dyn AlertSink>,
}

/// Router exposing `POST /webhook` and `GET /health`.
pub fn create_router(sink: Arc<dyn AlertSink>) -> Router {
    Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(WebhookState { sink })
}

/// Bind `addr` and serve until the task is dropped or the listener fails.
pub async fn serve(addr: SocketAddr, sink: Arc<dyn AlertSink>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Webhook receiver listening on {}", listener.local_addr()?);
    axum::serve(listener, create_router(sink)).await
}

async fn webhook_handler(State(state): State<WebhookState>, body: Bytes) -> Json<Value> {
    match serde_json::from_slice::<Value>(&body) {
        Ok(payload) => info!("Webhook payload received: {}", payload),
        Err(e) => warn!("Webhook body is not JSON ({}), treating as no data", e),
    }

    state.sink.dispatch(&webhook_ack_message(), true).await;

    Json(json!({ "status": "ok" }))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::DeliveryOutcome;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Mutex;
    use tower::ServiceExt;

    #[derive(Default)]
    struct RecordingSink {
        messages: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AlertSink for RecordingSink {
        async fn dispatch(&self, text: &str, _rich: bool) -> DeliveryOutcome {
            self.messages.lock().unwrap().push(text.to_string());
            DeliveryOutcome::Failed
        }
    }

    async fn post_webhook(sink: Arc<RecordingSink>, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = create_router(sink).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_json_payload_sends_one_ack() {
        let sink = Arc::new(RecordingSink::default());

        let (status, body) = post_webhook(sink.clone(), r#"{"foo":"bar"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
        assert_eq!(*sink.messages.lock().unwrap(), vec![webhook_ack_message()]);
    }

    #[tokio::test]
    async fn test_invalid_payload_still_acknowledged() {
        let sink = Arc::new(RecordingSink::default());

        let (status, body) = post_webhook(sink.clone(), "not json {").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(sink.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_body_still_acknowledged() {
        let sink = Arc::new(RecordingSink::default());

        let (status, _) = post_webhook(sink.clone(), "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(sink.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_health_does_not_alert() {
        let sink = Arc::new(RecordingSink::default());
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let response = create_router(sink.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(sink.messages.lock().unwrap().is_empty());
    }
}
