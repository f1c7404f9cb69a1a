//! `ssr-json` messages: flattened command/payload pairs.
//!
//! A message is a JSON array alternating command names and payloads:
//!
//! ```text
//! ["state", {"ref-pos": [0, 0, 0]}, "new-src", {"s1": {"pos": [1, 2]}}]
//! ```
//!
//! [`decode_message`] checks the structure of the whole message before
//! any command reaches the scene.

use serde_json::{Map, Value, json};

use super::attributes::{self, StateAttribute};
use crate::domain::{SourceAttributes, SourceId};
use crate::error::ClientError;

/// `state` command name.
pub const STATE: &str = "state";
/// `new-src` command name.
pub const NEW_SOURCE: &str = "new-src";
/// `mod-src` command name.
pub const MODIFY_SOURCE: &str = "mod-src";
/// `del-src` command name.
pub const DELETE_SOURCE: &str = "del-src";
/// `subscribe` command name.
pub const SUBSCRIBE: &str = "subscribe";

/// One decoded command with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Renderer/scene state attributes.
    State(Vec<StateAttribute>),
    /// Sources to create, keyed by id.
    NewSource(Vec<(SourceId, SourceAttributes)>),
    /// Sources to modify, keyed by id.
    ModifySource(Vec<(SourceId, SourceAttributes)>),
    /// Ids of sources to remove.
    DeleteSource(Vec<SourceId>),
    /// Topics to subscribe to (client → server only).
    Subscribe(Vec<String>),
}

impl Command {
    /// Wire name of the command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::State(_) => STATE,
            Self::NewSource(_) => NEW_SOURCE,
            Self::ModifySource(_) => MODIFY_SOURCE,
            Self::DeleteSource(_) => DELETE_SOURCE,
            Self::Subscribe(_) => SUBSCRIBE,
        }
    }

    /// Decodes the payload belonging to the command `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnknownCommand`] for names outside the
    /// vocabulary and [`ClientError::InvalidAttribute`] for malformed
    /// payloads.
    pub fn decode(name: &str, payload: &Value) -> Result<Self, ClientError> {
        match name {
            STATE => {
                let object = expect_object(STATE, payload)?;
                object
                    .iter()
                    .map(|(key, value)| StateAttribute::decode(key, value))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Self::State)
            }
            NEW_SOURCE => decode_source_batch(NEW_SOURCE, payload).map(Self::NewSource),
            MODIFY_SOURCE => decode_source_batch(MODIFY_SOURCE, payload).map(Self::ModifySource),
            DELETE_SOURCE => decode_string_list(DELETE_SOURCE, payload)
                .map(|ids| Self::DeleteSource(ids.into_iter().map(SourceId::from).collect())),
            SUBSCRIBE => decode_string_list(SUBSCRIBE, payload).map(Self::Subscribe),
            other => Err(ClientError::UnknownCommand(other.to_string())),
        }
    }

    /// Encodes the payload of this command.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::State(attrs) => Value::Object(
                attrs
                    .iter()
                    .map(|attr| (attr.name().to_string(), attr.to_json()))
                    .collect(),
            ),
            Self::NewSource(batch) | Self::ModifySource(batch) => Value::Object(
                batch
                    .iter()
                    .map(|(id, attrs)| (id.to_string(), attributes::source_to_json(attrs)))
                    .collect(),
            ),
            Self::DeleteSource(ids) => json!(ids),
            Self::Subscribe(topics) => json!(topics),
        }
    }
}

/// Parses one inbound message into its commands.
///
/// # Errors
///
/// Fails if the text is not JSON, is not an array, a command name is not a
/// string, a command has no payload, a command name is unknown, or a
/// payload is malformed.
pub fn decode_message(text: &str) -> Result<Vec<Command>, ClientError> {
    let value: Value = serde_json::from_str(text)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ClientError::InvalidMessage(format!(
                "message must be a JSON array, not {other}"
            )));
        }
    };

    let mut commands = Vec::with_capacity(items.len() / 2);
    let mut items = items.into_iter();
    while let Some(name) = items.next() {
        let Some(payload) = items.next() else {
            return Err(ClientError::MissingPayload(command_label(&name)));
        };
        let name = match name {
            Value::String(name) => name,
            other => return Err(ClientError::UnknownCommand(other.to_string())),
        };
        commands.push(Command::decode(&name, &payload)?);
    }
    Ok(commands)
}

/// Serializes commands into one message.
#[must_use]
pub fn encode_message(commands: &[Command]) -> String {
    let flat: Vec<Value> = commands
        .iter()
        .flat_map(|cmd| [Value::from(cmd.name()), cmd.payload()])
        .collect();
    Value::Array(flat).to_string()
}

fn command_label(name: &Value) -> String {
    name.as_str()
        .map_or_else(|| name.to_string(), ToString::to_string)
}

fn expect_object<'a>(what: &str, value: &'a Value) -> Result<&'a Map<String, Value>, ClientError> {
    value
        .as_object()
        .ok_or_else(|| ClientError::invalid_attribute(what, format!("expected a JSON object, not {value}")))
}

fn decode_source_batch(
    command: &str,
    payload: &Value,
) -> Result<Vec<(SourceId, SourceAttributes)>, ClientError> {
    expect_object(command, payload)?
        .iter()
        .map(|(id, attrs)| {
            let attrs = expect_object(id, attrs)?;
            Ok((SourceId::from(id.as_str()), attributes::decode_source(attrs)?))
        })
        .collect()
}

fn decode_string_list(command: &str, payload: &Value) -> Result<Vec<String>, ClientError> {
    let Some(items) = payload.as_array() else {
        return Err(ClientError::invalid_attribute(
            command,
            format!("expected a list of strings, not {payload}"),
        ));
    };
    items
        .iter()
        .map(|item| {
            item.as_str().map(ToString::to_string).ok_or_else(|| {
                ClientError::invalid_attribute(command, format!("expected a string, not {item}"))
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Orientation, Position};

    fn decode_ok(text: &str) -> Vec<Command> {
        match decode_message(text) {
            Ok(commands) => commands,
            Err(err) => panic!("decoding {text} failed: {err}"),
        }
    }

    #[test]
    fn empty_array_has_no_commands() {
        assert!(decode_ok("[]").is_empty());
    }

    #[test]
    fn rejects_non_array() {
        assert!(matches!(
            decode_message(r#"{"state": {}}"#),
            Err(ClientError::InvalidMessage(_))
        ));
        assert!(matches!(decode_message("not json"), Err(ClientError::Json(_))));
    }

    #[test]
    fn rejects_command_without_payload() {
        let result = decode_message(r#"["del-src", [], "state"]"#);
        assert!(matches!(result, Err(ClientError::MissingPayload(ref c)) if c == "state"));
    }

    #[test]
    fn rejects_unknown_command() {
        let result = decode_message(r#"["load-scene", "foo.asd"]"#);
        assert!(matches!(result, Err(ClientError::UnknownCommand(ref c)) if c == "load-scene"));
        assert!(matches!(
            decode_message("[42, {}]"),
            Err(ClientError::UnknownCommand(_))
        ));
    }

    #[test]
    fn decodes_pairs_in_order() {
        let commands = decode_ok(
            r#"["new-src", {"s1": {"pos": [1, 2], "active": false}}, "del-src", ["s1"]]"#,
        );
        let [Command::NewSource(batch), Command::DeleteSource(ids)] = commands.as_slice() else {
            panic!("unexpected commands: {commands:?}");
        };
        let Some((id, attrs)) = batch.first() else {
            panic!("one source expected");
        };
        assert_eq!(id.as_str(), "s1");
        assert_eq!(attrs.position, Some(Position::new(1.0, 2.0, 0.0)));
        assert_eq!(attrs.active, Some(false));
        assert_eq!(ids.as_slice(), &[SourceId::from("s1")]);
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert!(decode_message(r#"["del-src", "s1"]"#).is_err());
        assert!(decode_message(r#"["del-src", [1]]"#).is_err());
        assert!(decode_message(r#"["new-src", ["s1"]]"#).is_err());
        assert!(decode_message(r#"["mod-src", {"s1": [0, 0]}]"#).is_err());
        assert!(decode_message(r#"["state", []]"#).is_err());
        assert!(decode_message(r#"["mod-src", {"s1": {"rot": [0, 0, 1]}}]"#).is_err());
    }

    #[test]
    fn subscribe_encodes_like_the_handshake() {
        let msg = encode_message(&[Command::Subscribe(vec![
            "scene".to_string(),
            "renderer".to_string(),
        ])]);
        assert_eq!(msg, r#"["subscribe",["scene","renderer"]]"#);
    }

    #[test]
    fn outbound_pose_survives_echo() {
        let pos = Position::new(0.1, -2.75, 1.0 / 3.0);
        let rot = Orientation::new(0.0, 0.0, 0.382_683_432_365_089_8, 0.923_879_532_511_286_7);
        let sent = Command::ModifySource(vec![(
            SourceId::from("piano"),
            SourceAttributes::pose(Some(pos), Some(rot)),
        )]);

        let echoed = decode_ok(&encode_message(std::slice::from_ref(&sent)));
        assert_eq!(echoed, vec![sent]);
    }

    #[test]
    fn state_payload_keeps_attribute_names() {
        let cmd = Command::State(vec![
            StateAttribute::ReferencePosition(Position::new(1.0, 0.0, 0.0)),
            StateAttribute::ReferenceOrientation(Orientation::IDENTITY),
        ]);
        let payload = cmd.payload();
        assert_eq!(payload.get("ref-pos"), Some(&json!([1.0, 0.0, 0.0])));
        assert_eq!(payload.get("ref-rot"), Some(&json!([0.0, 0.0, 0.0, 1.0])));
    }
}
