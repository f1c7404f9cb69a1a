//! The `ssr-json` protocol: message codec, command interpreter, and
//! outbound notifier.
//!
//! Inbound and outbound messages share one vocabulary (`state`,
//! `new-src`, `mod-src`, `del-src`, plus `subscribe` from the client).

pub mod attributes;
pub mod command;
pub mod interpreter;
pub mod notifier;

pub use attributes::StateAttribute;
pub use command::{Command, decode_message, encode_message};
pub use interpreter::apply_command;
pub use notifier::{Gesture, Notifier};

/// WebSocket subprotocol requested from the SSR.
pub const SUBPROTOCOL: &str = "ssr-json";

/// Topics subscribed to right after connecting.
pub const DEFAULT_SUBSCRIPTIONS: &[&str] = &["scene", "renderer"];
