//! Dispatch of decoded commands to scene mutations.

use chrono::Utc;

use super::attributes::StateAttribute;
use super::command::Command;
use crate::domain::{ChangeOrigin, ReferenceUpdate, Scene, SceneEvent};
use crate::error::ClientError;

/// Applies one command to the scene and returns the resulting events.
///
/// Each command is validated in full before the scene changes, so an error
/// leaves the scene as it was before this command.
///
/// # Errors
///
/// - [`ClientError::SourceExists`] for `new-src` with a live id.
/// - [`ClientError::SourceNotFound`] for `mod-src`/`del-src` with an
///   unknown id.
/// - [`ClientError::LoudspeakersExist`] for a second `loudspeakers` state.
/// - [`ClientError::InvalidMessage`] for `subscribe`, which only flows
///   from client to server.
pub fn apply_command(
    scene: &mut Scene,
    command: &Command,
    origin: ChangeOrigin,
) -> Result<Vec<SceneEvent>, ClientError> {
    let timestamp = Utc::now();
    match command {
        Command::State(attrs) => apply_state(scene, attrs, origin),
        Command::NewSource(batch) => Ok(scene
            .create_sources(batch)?
            .into_iter()
            .map(|source| SceneEvent::SourceCreated {
                source,
                origin,
                timestamp,
            })
            .collect()),
        Command::ModifySource(batch) => Ok(scene
            .modify_sources(batch)?
            .into_iter()
            .map(|source| SceneEvent::SourceModified {
                source,
                origin,
                timestamp,
            })
            .collect()),
        Command::DeleteSource(ids) => {
            scene.delete_sources(ids)?;
            Ok(ids
                .iter()
                .map(|id| SceneEvent::SourceDeleted {
                    source_id: id.clone(),
                    origin,
                    timestamp,
                })
                .collect())
        }
        Command::Subscribe(_) => Err(ClientError::InvalidMessage(
            "\"subscribe\" is not accepted from the server".to_string(),
        )),
    }
}

fn apply_state(
    scene: &mut Scene,
    attrs: &[StateAttribute],
    origin: ChangeOrigin,
) -> Result<Vec<SceneEvent>, ClientError> {
    let mut update = ReferenceUpdate::default();
    let mut loudspeakers = None;
    for attr in attrs {
        match attr {
            StateAttribute::Loudspeakers(list) => loudspeakers = Some(list),
            StateAttribute::ReferencePosition(pos) => update.position = Some(*pos),
            StateAttribute::ReferenceOrientation(rot) => update.orientation = Some(*rot),
            StateAttribute::ReferencePositionOffset(pos) => update.offset_position = Some(*pos),
            StateAttribute::ReferenceOrientationOffset(rot) => {
                update.offset_orientation = Some(*rot);
            }
            StateAttribute::Other { name, value } => {
                tracing::debug!(attribute = %name, %value, "ignoring state attribute");
            }
        }
    }

    let timestamp = Utc::now();
    let mut events = Vec::new();
    if let Some(list) = loudspeakers {
        scene.create_loudspeakers(list.clone())?;
        events.push(SceneEvent::LoudspeakersCreated {
            loudspeakers: list.clone(),
            timestamp,
        });
    }
    if !update.is_empty() {
        let reference = scene.update_reference(&update);
        events.push(SceneEvent::ReferenceChanged {
            reference,
            origin,
            timestamp,
        });
    }
    Ok(events)
}
