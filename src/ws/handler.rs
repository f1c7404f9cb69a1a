//! Axum WebSocket upgrade handler for viewers.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;

/// `GET /ws` — Upgrade HTTP connection to a viewer event stream.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let event_rx = state.event_bus.subscribe();
    tracing::debug!(viewers = state.event_bus.receiver_count(), "viewer connecting");
    ws.on_upgrade(move |socket| run_connection(socket, event_rx))
}
