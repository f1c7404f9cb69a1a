//! Viewer WebSocket message types: envelope and commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level viewer WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerMessage {
    /// Client-provided ID for requests; empty for events.
    #[serde(default)]
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: ViewerMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl ViewerMessage {
    /// Builds a server → viewer message stamped with the current time.
    #[must_use]
    pub fn new(id: String, msg_type: ViewerMessageType, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Discriminator for viewer WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewerMessageType {
    /// Viewer → client command.
    Command,
    /// Client → viewer response to a command.
    Response,
    /// Client → viewer scene event.
    Event,
    /// Client → viewer error.
    Error,
}

/// Commands a viewer can send, carried in the envelope payload.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewerCommand {
    /// Restrict source events to these ids. `["*"]` restores all.
    Subscribe {
        /// Source ids to follow.
        source_ids: Vec<String>,
    },
    /// Stop following these source ids.
    Unsubscribe {
        /// Source ids to drop.
        source_ids: Vec<String>,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_command_parses_from_payload() {
        let json = serde_json::json!({"command": "subscribe", "source_ids": ["a", "*"]});
        let Ok(cmd) = serde_json::from_value::<ViewerCommand>(json) else {
            panic!("valid command");
        };
        assert_eq!(
            cmd,
            ViewerCommand::Subscribe {
                source_ids: vec!["a".to_string(), "*".to_string()]
            }
        );
    }

    #[test]
    fn envelope_uses_type_key() {
        let msg = ViewerMessage::new(
            String::new(),
            ViewerMessageType::Event,
            serde_json::json!({}),
        );
        let Ok(json) = serde_json::to_string(&msg) else {
            panic!("serialization failed");
        };
        assert!(json.contains("\"type\":\"event\""));
    }
}
