//! SSR link: the WebSocket connection to the renderer.

pub mod client;

pub use client::{connect, run_link};
