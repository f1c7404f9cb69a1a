//! Attribute vocabularies of `state`, `new-src`, and `mod-src`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::domain::{Loudspeaker, Orientation, Position, SourceAttributes};
use crate::error::ClientError;

/// Source attributes only the renderer cares about.
const SERVER_SIDE_SOURCE_ATTRIBUTES: &[&str] = &[
    "level",
    "output-activity",
    "properties-file",
    "audio-file",
    "port-number",
    "channel",
];

/// One attribute of a `state` payload.
#[derive(Debug, Clone, PartialEq)]
pub enum StateAttribute {
    /// `loudspeakers`: the loudspeaker set, sent once.
    Loudspeakers(Vec<Loudspeaker>),
    /// `ref-pos`
    ReferencePosition(Position),
    /// `ref-rot`
    ReferenceOrientation(Orientation),
    /// `ref-pos-offset`
    ReferencePositionOffset(Position),
    /// `ref-rot-offset`
    ReferenceOrientationOffset(Orientation),
    /// Anything else the renderer reports (`master-volume`, `cpu`, ...).
    Other {
        /// Attribute name.
        name: String,
        /// Raw value.
        value: Value,
    },
}

impl StateAttribute {
    /// Decodes one `state` member.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidAttribute`] if a recognized attribute
    /// has a malformed value. Unrecognized attributes never fail.
    pub fn decode(name: &str, value: &Value) -> Result<Self, ClientError> {
        Ok(match name {
            "loudspeakers" => Self::Loudspeakers(parse(name, value)?),
            "ref-pos" => Self::ReferencePosition(parse(name, value)?),
            "ref-rot" => Self::ReferenceOrientation(parse(name, value)?),
            "ref-pos-offset" => Self::ReferencePositionOffset(parse(name, value)?),
            "ref-rot-offset" => Self::ReferenceOrientationOffset(parse(name, value)?),
            _ => Self::Other {
                name: name.to_string(),
                value: value.clone(),
            },
        })
    }

    /// Wire name of the attribute.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Loudspeakers(_) => "loudspeakers",
            Self::ReferencePosition(_) => "ref-pos",
            Self::ReferenceOrientation(_) => "ref-rot",
            Self::ReferencePositionOffset(_) => "ref-pos-offset",
            Self::ReferenceOrientationOffset(_) => "ref-rot-offset",
            Self::Other { name, .. } => name,
        }
    }

    /// Wire value of the attribute.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Loudspeakers(list) => json!(list),
            Self::ReferencePosition(pos) | Self::ReferencePositionOffset(pos) => {
                json!(pos.to_array())
            }
            Self::ReferenceOrientation(rot) | Self::ReferenceOrientationOffset(rot) => {
                json!(rot.to_array())
            }
            Self::Other { value, .. } => value.clone(),
        }
    }
}

/// Decodes the attribute object of one source.
///
/// # Errors
///
/// Returns [`ClientError::InvalidAttribute`] if a recognized attribute has
/// the wrong type or arity.
pub fn decode_source(object: &Map<String, Value>) -> Result<SourceAttributes, ClientError> {
    let mut attrs = SourceAttributes::default();
    for (name, value) in object {
        match name.as_str() {
            "pos" => attrs.position = Some(parse(name, value)?),
            "rot" => attrs.orientation = Some(parse(name, value)?),
            "active" => attrs.active = Some(parse(name, value)?),
            "name" => attrs.name = Some(parse(name, value)?),
            "model" => attrs.model = Some(parse(name, value)?),
            "volume" => attrs.volume = Some(parse(name, value)?),
            "mute" => attrs.mute = Some(parse(name, value)?),
            "fixed" => attrs.fixed = Some(parse(name, value)?),
            other if SERVER_SIDE_SOURCE_ATTRIBUTES.contains(&other) => {
                tracing::debug!(attribute = other, "ignoring renderer-side source attribute");
            }
            other => tracing::warn!(attribute = other, "unknown source attribute"),
        }
    }
    Ok(attrs)
}

/// Encodes the present attributes of a source update.
#[must_use]
pub fn source_to_json(attrs: &SourceAttributes) -> Value {
    let mut object = Map::new();
    if let Some(pos) = attrs.position {
        object.insert("pos".to_string(), json!(pos.to_array()));
    }
    if let Some(rot) = attrs.orientation {
        object.insert("rot".to_string(), json!(rot.to_array()));
    }
    if let Some(active) = attrs.active {
        object.insert("active".to_string(), Value::Bool(active));
    }
    if let Some(name) = &attrs.name {
        object.insert("name".to_string(), Value::from(name.as_str()));
    }
    if let Some(model) = &attrs.model {
        object.insert("model".to_string(), Value::from(model.as_str()));
    }
    if let Some(volume) = attrs.volume {
        object.insert("volume".to_string(), json!(volume));
    }
    if let Some(mute) = attrs.mute {
        object.insert("mute".to_string(), Value::Bool(mute));
    }
    if let Some(fixed) = attrs.fixed {
        object.insert("fixed".to_string(), Value::Bool(fixed));
    }
    Value::Object(object)
}

fn parse<T: DeserializeOwned>(name: &str, value: &Value) -> Result<T, ClientError> {
    serde_json::from_value(value.clone()).map_err(|err| ClientError::invalid_attribute(name, err))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn decodes_full_source_vocabulary() {
        let attrs = decode_source(&object(json!({
            "pos": [1, 2, 3],
            "rot": [0, 0, 0, 1],
            "active": true,
            "name": "Vocals",
            "model": "point",
            "volume": 0.5,
            "mute": false,
            "fixed": true,
        })));
        let Ok(attrs) = attrs else {
            panic!("valid attributes");
        };
        assert_eq!(attrs.position, Some(Position::new(1.0, 2.0, 3.0)));
        assert_eq!(attrs.orientation, Some(Orientation::IDENTITY));
        assert_eq!(attrs.name.as_deref(), Some("Vocals"));
        assert_eq!(attrs.volume, Some(0.5));
        assert_eq!(attrs.fixed, Some(true));
    }

    #[test]
    fn ignores_unknown_and_server_side_attributes() {
        let Ok(attrs) = decode_source(&object(json!({"level": 0.3, "colour": "red"}))) else {
            panic!("unknown attributes are not fatal");
        };
        assert!(attrs.is_empty());
    }

    #[test]
    fn wrong_type_is_an_error() {
        let result = decode_source(&object(json!({"active": "yes"})));
        assert!(matches!(
            result,
            Err(ClientError::InvalidAttribute { ref attribute, .. }) if attribute == "active"
        ));
    }

    #[test]
    fn unrecognized_state_attribute_is_kept_raw() {
        let Ok(attr) = StateAttribute::decode("master-volume", &json!(0.8)) else {
            panic!("unrecognized state attributes are not fatal");
        };
        assert_eq!(attr.name(), "master-volume");
        assert_eq!(attr.to_json(), json!(0.8));
    }

    #[test]
    fn loudspeaker_list_must_be_a_list() {
        assert!(StateAttribute::decode("loudspeakers", &json!({"pos": [0, 0]})).is_err());
        let Ok(StateAttribute::Loudspeakers(list)) = StateAttribute::decode(
            "loudspeakers",
            &json!([{"pos": [1, 0, 0], "rot": [0, 0, 1, 0]}, {"pos": [-1, 0]}]),
        ) else {
            panic!("valid loudspeakers");
        };
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn encoding_skips_absent_attributes() {
        let json = source_to_json(&SourceAttributes::pose(None, Some(Orientation::IDENTITY)));
        assert_eq!(json, json!({"rot": [0.0, 0.0, 0.0, 1.0]}));
    }
}
