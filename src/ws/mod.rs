//! Viewer WebSocket layer: scene event stream with per-viewer filtering.
//!
//! The endpoint at `/ws` pushes every scene change to local viewers, which
//! take the place of the browser scene graph.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
