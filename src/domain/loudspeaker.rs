//! Loudspeakers of the reproduction setup.

use serde::{Deserialize, Serialize};

use super::{Orientation, Pose, Position};

/// One loudspeaker, positioned relative to the reference.
///
/// The loudspeaker set arrives once in a `state` message and never changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loudspeaker {
    /// Position relative to the reference.
    pub pos: Position,
    /// Orientation relative to the reference.
    #[serde(default)]
    pub rot: Orientation,
    /// Loudspeaker model, e.g. `"subwoofer"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Loudspeaker {
    /// Pose relative to the reference.
    #[must_use]
    pub const fn pose(&self) -> Pose {
        Pose::new(self.pos, self.rot)
    }

    /// Creates a loudspeaker without model.
    #[must_use]
    pub const fn new(pos: Position, rot: Orientation) -> Self {
        Self {
            pos,
            rot,
            model: None,
        }
    }
}
