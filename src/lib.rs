//! # ssr-scene-client
//!
//! Scene synchronization client for the SoundScape Renderer (SSR)
//! WebSocket interface.
//!
//! The client mirrors the renderer's scene (sound sources, loudspeakers,
//! and the listener "reference") by applying `ssr-json` command messages,
//! and reports operator edits back to the renderer with the same command
//! vocabulary. A local REST API and event stream take the place of the
//! browser scene view.
//!
//! ## Architecture
//!
//! ```text
//! SSR server (ws, subprotocol "ssr-json")
//!     │
//!     ├── SSR link (transport/)
//!     │
//!     ├── SceneService (service/)
//!     │     ├── Command codec + interpreter (protocol/)
//!     │     ├── Notifier (protocol/)  ──► outbound queue ──► SSR link
//!     │     └── Scene + EventBus (domain/)
//!     │
//!     ├── REST handlers (api/)
//!     └── Viewer WS (ws/)
//!           │
//! Local operators and viewers (HTTP, WebSocket)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod protocol;
pub mod service;
pub mod transport;
pub mod ws;
