//! Events reflecting scene mutations.
//!
//! Every applied command or gesture emits one or more [`SceneEvent`]s
//! through the [`super::EventBus`]. Local viewers connected to `/ws`
//! receive them as JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Loudspeaker, Reference, Source, SourceId};

/// Where a scene change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOrigin {
    /// Applied from a message sent by the SSR server.
    Remote,
    /// Applied from a local operator gesture.
    Local,
}

/// Domain event emitted after every scene mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum SceneEvent {
    /// A source was created.
    SourceCreated {
        /// Full source state after creation.
        source: Source,
        /// Change origin.
        origin: ChangeOrigin,
        /// Timestamp.
        timestamp: DateTime<Utc>,
    },

    /// One or more attributes of a source changed.
    SourceModified {
        /// Full source state after the change.
        source: Source,
        /// Change origin.
        origin: ChangeOrigin,
        /// Timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A source was removed.
    SourceDeleted {
        /// Id of the removed source.
        source_id: SourceId,
        /// Change origin.
        origin: ChangeOrigin,
        /// Timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Reference pose or offset changed.
    ReferenceChanged {
        /// Reference state after the change.
        reference: Reference,
        /// Change origin.
        origin: ChangeOrigin,
        /// Timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The loudspeaker set was created.
    LoudspeakersCreated {
        /// Loudspeakers relative to the reference.
        loudspeakers: Vec<Loudspeaker>,
        /// Timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl SceneEvent {
    /// Returns the source id for source events, `None` otherwise.
    #[must_use]
    pub fn source_id(&self) -> Option<&SourceId> {
        match self {
            Self::SourceCreated { source, .. } | Self::SourceModified { source, .. } => {
                Some(&source.id)
            }
            Self::SourceDeleted { source_id, .. } => Some(source_id),
            Self::ReferenceChanged { .. } | Self::LoudspeakersCreated { .. } => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::SourceCreated { .. } => "source_created",
            Self::SourceModified { .. } => "source_modified",
            Self::SourceDeleted { .. } => "source_deleted",
            Self::ReferenceChanged { .. } => "reference_changed",
            Self::LoudspeakersCreated { .. } => "loudspeakers_created",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn source_created_serializes_with_tag() {
        let event = SceneEvent::SourceCreated {
            source: Source::new(SourceId::from("vocals")),
            origin: ChangeOrigin::Remote,
            timestamp: Utc::now(),
        };
        let Ok(json) = serde_json::to_string(&event) else {
            panic!("serialization failed");
        };
        assert!(json.contains("\"event_type\":\"source_created\""));
        assert!(json.contains("\"origin\":\"remote\""));
        assert!(json.contains("\"pos\":[0.0,0.0,0.0]"));
    }

    #[test]
    fn source_id_accessor() {
        let id = SourceId::from("drums");
        let event = SceneEvent::SourceDeleted {
            source_id: id.clone(),
            origin: ChangeOrigin::Local,
            timestamp: Utc::now(),
        };
        assert_eq!(event.source_id(), Some(&id));
        assert_eq!(event.event_type_str(), "source_deleted");

        let reference = SceneEvent::ReferenceChanged {
            reference: Reference::default(),
            origin: ChangeOrigin::Remote,
            timestamp: Utc::now(),
        };
        assert!(reference.source_id().is_none());
    }
}
