//! End-to-end tests of the SSR link against a mock renderer.

#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::routing::get;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::timeout;

use ssr_scene_client::domain::{EventBus, Orientation, Position, SceneEvent, SourceId};
use ssr_scene_client::error::ClientError;
use ssr_scene_client::protocol::{Gesture, Notifier, SUBPROTOCOL};
use ssr_scene_client::service::SceneService;
use ssr_scene_client::transport::run_link;

const WAIT: Duration = Duration::from_secs(5);

/// Mock renderer: records everything the client sends, plays `script`
/// after the first client message, then optionally closes.
async fn spawn_mock_ssr(
    script: Vec<String>,
    close: bool,
) -> (String, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new().route(
        "/",
        get(move |ws: WebSocketUpgrade| {
            let script = script.clone();
            let tx = tx.clone();
            async move {
                ws.protocols([SUBPROTOCOL])
                    .on_upgrade(move |socket| mock_session(socket, script, tx, close))
            }
        }),
    );

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("ws://{addr}/"), rx)
}

async fn mock_session(
    mut socket: WebSocket,
    script: Vec<String>,
    tx: mpsc::UnboundedSender<String>,
    close: bool,
) {
    // Wait for the subscription before sending the scene.
    if let Some(Ok(Message::Text(text))) = socket.recv().await {
        let _ = tx.send(text.as_str().to_string());
    }
    for msg in script {
        if socket.send(Message::text(msg)).await.is_err() {
            return;
        }
    }
    if close {
        let _ = socket.send(Message::Close(None)).await;
        return;
    }
    while let Some(Ok(msg)) = socket.recv().await {
        if let Message::Text(text) = msg {
            let _ = tx.send(text.as_str().to_string());
        }
    }
}

fn start_client(url: String) -> (Arc<SceneService>, JoinHandle<Result<(), ClientError>>) {
    let (notifier, outbound_rx) = Notifier::channel();
    let service = Arc::new(SceneService::new(EventBus::new(256), notifier));
    let topics = vec!["scene".to_string(), "renderer".to_string()];
    let link_service = Arc::clone(&service);
    let handle =
        tokio::spawn(async move { run_link(&url, &topics, link_service, outbound_rx).await });
    (service, handle)
}

async fn next_message(rx: &mut mpsc::UnboundedReceiver<String>) -> String {
    match timeout(WAIT, rx.recv()).await {
        Ok(Some(msg)) => msg,
        Ok(None) => panic!("mock renderer stopped"),
        Err(_) => panic!("timed out waiting for a client message"),
    }
}

async fn wait_for_events(events: &mut broadcast::Receiver<SceneEvent>, count: usize) {
    for _ in 0..count {
        match timeout(WAIT, events.recv()).await {
            Ok(Ok(_)) => {}
            other => panic!("expected scene event, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn subscribes_mirrors_scene_and_reports_gestures() {
    let script = vec![
        r#"["state", {"loudspeakers": [{"pos": [1, 0, 0], "rot": [0, 0, 1, 0]}, {"pos": [-1, 0, 0]}],
                      "ref-pos": [0, 0, 0], "sample-rate": 48000}]"#
            .to_string(),
        r#"["new-src", {"a": {"pos": [1, 2], "name": "Vocals"}, "b": {"active": false}}]"#
            .to_string(),
        r#"["mod-src", {"a": {"pos": [3, 4, 0.5]}}, "del-src", ["b"]]"#.to_string(),
    ];
    let (url, mut from_client) = spawn_mock_ssr(script, false).await;
    let (service, _link) = start_client(url);
    // The link task has not run yet, so no event can be missed.
    let mut events = service.event_bus().subscribe();

    let subscribe = next_message(&mut from_client).await;
    assert_eq!(subscribe, r#"["subscribe",["scene","renderer"]]"#);

    // loudspeakers + reference, two creations, one modification, one deletion
    wait_for_events(&mut events, 6).await;
    assert!(service.is_connected());

    let snapshot = service.snapshot().await;
    assert_eq!(snapshot.loudspeakers.len(), 2);
    assert_eq!(snapshot.sources.len(), 1);
    let Some(a) = snapshot.sources.first() else {
        panic!("source a expected");
    };
    assert_eq!(a.position, Position::new(3.0, 4.0, 0.5));
    assert_eq!(a.name.as_deref(), Some("Vocals"));

    let gesture = Gesture::Source {
        id: SourceId::from("a"),
        position: Some(Position::new(-1.0, 0.5, 0.0)),
        orientation: Some(Orientation::IDENTITY),
    };
    assert!(service.apply_gesture(gesture).await.is_ok());
    let reported = next_message(&mut from_client).await;
    assert_eq!(
        reported,
        r#"["mod-src",{"a":{"pos":[-1.0,0.5,0.0],"rot":[0.0,0.0,0.0,1.0]}}]"#
    );
}

#[tokio::test]
async fn protocol_violation_ends_the_link() {
    let script = vec![r#"["new-src", {"a": {}}, "new-src", {"a": {}}]"#.to_string()];
    let (url, mut from_client) = spawn_mock_ssr(script, false).await;
    let (service, link) = start_client(url);
    let _ = next_message(&mut from_client).await;

    let result = match timeout(WAIT, link).await {
        Ok(Ok(result)) => result,
        other => panic!("link did not finish: {other:?}"),
    };
    assert!(matches!(result, Err(ClientError::SourceExists(_))));
    assert!(!service.is_connected());
    // The first creation stays applied.
    assert!(service.source("a").await.is_ok());
}

#[tokio::test]
async fn server_close_ends_the_link_cleanly() {
    let script = vec![r#"["state", {"ref-rot": [0, 0, 1, 0]}]"#.to_string()];
    let (url, mut from_client) = spawn_mock_ssr(script, true).await;
    let (service, link) = start_client(url);
    let _ = next_message(&mut from_client).await;

    let result = match timeout(WAIT, link).await {
        Ok(Ok(result)) => result,
        other => panic!("link did not finish: {other:?}"),
    };
    assert!(result.is_ok());
    assert_eq!(
        service.reference().await.pose.rot,
        Orientation::new(0.0, 0.0, 1.0, 0.0)
    );
}

#[tokio::test]
async fn unreachable_renderer_is_a_transport_error() {
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    drop(listener);

    let (_service, link) = start_client(format!("ws://{addr}/"));
    let result = match timeout(WAIT, link).await {
        Ok(Ok(result)) => result,
        other => panic!("link did not finish: {other:?}"),
    };
    assert!(matches!(result, Err(ClientError::Transport(_))));
}
