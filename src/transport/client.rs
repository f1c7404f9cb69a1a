//! WebSocket client for the SSR `ssr-json` interface.
//!
//! [`run_link`] connects, subscribes, and then runs the read/write loop:
//! inbound text messages go to the [`SceneService`], queued outbound
//! messages go to the renderer. Protocol violations end the link; there
//! is no reconnection.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::error::ClientError;
use crate::protocol::{Command, SUBPROTOCOL, encode_message};
use crate::service::SceneService;

/// Connected SSR WebSocket stream.
pub type SsrStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Opens a WebSocket to `url` requesting the `ssr-json` subprotocol.
///
/// # Errors
///
/// Returns [`ClientError::Transport`] if the URL is invalid or the
/// connection or handshake fails.
pub async fn connect(url: &str) -> Result<SsrStream, ClientError> {
    let mut request = url.into_client_request()?;
    request
        .headers_mut()
        .insert(SEC_WEBSOCKET_PROTOCOL, HeaderValue::from_static(SUBPROTOCOL));

    let (stream, response) = connect_async(request).await?;
    let protocol = response
        .headers()
        .get(SEC_WEBSOCKET_PROTOCOL)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if protocol != SUBPROTOCOL {
        tracing::warn!(url, protocol, "server did not confirm the ssr-json subprotocol");
    }
    tracing::info!(url, protocol, "connected to SSR");
    Ok(stream)
}

/// Runs the SSR link until the connection closes or a message is rejected.
///
/// Sends `["subscribe", topics]` right after connecting. Outbound messages
/// are taken from `outbound` and sent as-is.
///
/// # Errors
///
/// Returns the first transport error or protocol violation. A clean close
/// from either side returns `Ok(())`.
pub async fn run_link(
    url: &str,
    topics: &[String],
    service: Arc<SceneService>,
    mut outbound: mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let stream = connect(url).await?;
    let (mut ws_tx, mut ws_rx) = stream.split();

    service.set_connected(true);
    let result = async {
        let subscribe = encode_message(&[Command::Subscribe(topics.to_vec())]);
        ws_tx.send(Message::text(subscribe)).await?;

        loop {
            tokio::select! {
                // Incoming message from the renderer
                msg = ws_rx.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            let count = service.handle_message(text.as_str()).await?;
                            tracing::trace!(commands = count, "applied inbound message");
                        }
                        Some(Ok(Message::Close(frame))) => {
                            tracing::info!(?frame, "SSR closed the connection");
                            break;
                        }
                        None => {
                            tracing::info!("SSR connection ended");
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(err)) => return Err(err.into()),
                    }
                }
                // Local gesture to report
                out = outbound.recv() => {
                    let Some(text) = out else {
                        tracing::debug!("outbound queue closed, closing link");
                        let _ = ws_tx.close().await;
                        break;
                    };
                    ws_tx.send(Message::text(text)).await?;
                }
            }
        }
        Ok::<(), ClientError>(())
    }
    .await;
    service.set_connected(false);
    result
}
