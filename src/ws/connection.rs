//! Viewer WebSocket connection loop.
//!
//! Handles the read/write loop for a single viewer, applying filter
//! commands and forwarding matching scene events.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{ViewerCommand, ViewerMessage, ViewerMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::SceneEvent;

/// Runs the read/write loop for a single viewer connection.
///
/// - Reads filter commands from the viewer and answers them.
/// - Forwards matching events from the [`broadcast::Receiver`].
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<SceneEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            // Incoming message from viewer
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(text.as_str(), &mut subs);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(scene_event) => {
                        if subs.matches(&scene_event) {
                            let msg = ViewerMessage::new(
                                String::new(),
                                ViewerMessageType::Event,
                                serde_json::to_value(&scene_event).unwrap_or_default(),
                            );
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "viewer lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("viewer connection closed");
}

/// Handles a text message from the viewer, returning an optional JSON
/// response.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<ViewerMessage>(text) else {
        return error_response(String::new(), 400, "malformed JSON");
    };

    let Ok(command) = serde_json::from_value::<ViewerCommand>(msg.payload) else {
        return error_response(msg.id, 404, "unknown command");
    };

    let payload = match command {
        ViewerCommand::Subscribe { source_ids } if source_ids.is_empty() => {
            return error_response(msg.id, 400, "source_ids must not be empty");
        }
        ViewerCommand::Subscribe { source_ids } => {
            subs.subscribe(&source_ids);
            serde_json::json!({
                "subscribed": source_ids,
                "count": subs.count(),
                "excluded_count": subs.excluded_count(),
                "wildcard": subs.is_subscribed_all(),
            })
        }
        ViewerCommand::Unsubscribe { source_ids } => {
            subs.unsubscribe(&source_ids);
            serde_json::json!({
                "unsubscribed": source_ids,
                "remaining_count": subs.count(),
                "excluded_count": subs.excluded_count(),
                "wildcard": subs.is_subscribed_all(),
            })
        }
    };
    let response = ViewerMessage::new(msg.id, ViewerMessageType::Response, payload);
    serde_json::to_string(&response).ok()
}

fn error_response(id: String, code: u16, message: &str) -> Option<String> {
    let err = ViewerMessage::new(
        id,
        ViewerMessageType::Error,
        serde_json::json!({
            "code": code,
            "message": message,
        }),
    );
    serde_json::to_string(&err).ok()
}
