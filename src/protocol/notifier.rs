//! Outbound notifications for local operator gestures.
//!
//! A completed gesture becomes exactly one [`Command`], which is applied to
//! the local scene and queued for the SSR link as one message. Sending is
//! fire-and-forget: nothing waits for the renderer to acknowledge.

use tokio::sync::mpsc;

use super::attributes::StateAttribute;
use super::command::{Command, encode_message};
use crate::domain::{Orientation, Position, SourceAttributes, SourceId};
use crate::error::ClientError;

/// A completed move/rotate of a scene object.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// A source was dragged and/or rotated.
    Source {
        /// Target source.
        id: SourceId,
        /// New position, if it moved.
        position: Option<Position>,
        /// New orientation, if it rotated.
        orientation: Option<Orientation>,
    },
    /// The reference was dragged and/or rotated.
    Reference {
        /// New position, if it moved.
        position: Option<Position>,
        /// New orientation, if it rotated.
        orientation: Option<Orientation>,
    },
    /// The reference offset was dragged and/or rotated.
    ReferenceOffset {
        /// New offset position, if it moved.
        position: Option<Position>,
        /// New offset orientation, if it rotated.
        orientation: Option<Orientation>,
    },
}

impl Gesture {
    /// Converts the gesture into the command that reports it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] if the gesture carries
    /// neither a position nor an orientation.
    pub fn into_command(self) -> Result<Command, ClientError> {
        let (position, orientation) = match &self {
            Self::Source {
                position,
                orientation,
                ..
            }
            | Self::Reference {
                position,
                orientation,
            }
            | Self::ReferenceOffset {
                position,
                orientation,
            } => (*position, *orientation),
        };
        if position.is_none() && orientation.is_none() {
            return Err(ClientError::InvalidRequest(
                "gesture needs a position or an orientation".to_string(),
            ));
        }

        Ok(match self {
            Self::Source { id, .. } => Command::ModifySource(vec![(
                id,
                SourceAttributes::pose(position, orientation),
            )]),
            Self::Reference { .. } => Command::State(
                position
                    .map(StateAttribute::ReferencePosition)
                    .into_iter()
                    .chain(orientation.map(StateAttribute::ReferenceOrientation))
                    .collect(),
            ),
            Self::ReferenceOffset { .. } => Command::State(
                position
                    .map(StateAttribute::ReferencePositionOffset)
                    .into_iter()
                    .chain(orientation.map(StateAttribute::ReferenceOrientationOffset))
                    .collect(),
            ),
        })
    }
}

/// Queue of encoded messages for the SSR link.
#[derive(Debug, Clone)]
pub struct Notifier {
    outbound: mpsc::UnboundedSender<String>,
}

impl Notifier {
    /// Creates a notifier and the receiving end drained by the transport.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (outbound, rx) = mpsc::unbounded_channel();
        (Self { outbound }, rx)
    }

    /// Encodes `commands` into one message and queues it.
    ///
    /// Returns `false` if the link is gone; the message is dropped then.
    pub fn send(&self, commands: &[Command]) -> bool {
        let message = encode_message(commands);
        tracing::debug!(%message, "queueing outbound message");
        if self.outbound.send(message).is_err() {
            tracing::warn!("ssr link closed, dropping outbound message");
            return false;
        }
        true
    }
}
