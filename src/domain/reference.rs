//! The listener ("reference") and its offset.

use serde::Serialize;

use super::Pose;

/// Singleton listener pose plus a secondary offset pose.
///
/// The offset is expressed in the reference's frame: tracker input moves
/// the offset while the operator moves the reference itself.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Reference {
    /// Reference pose in scene coordinates.
    pub pose: Pose,
    /// Offset pose relative to [`Reference::pose`].
    pub offset: Pose,
}

impl Reference {
    /// The offset pose in scene coordinates.
    #[must_use]
    pub fn offset_in_scene(&self) -> Pose {
        self.pose.compose(&self.offset)
    }

    /// A pose given relative to the reference, in scene coordinates.
    #[must_use]
    pub fn to_scene(&self, relative: &Pose) -> Pose {
        self.pose.compose(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Orientation, Position};

    #[test]
    fn default_offset_coincides_with_reference() {
        let reference = Reference {
            pose: Pose::new(Position::new(2.0, -1.0, 0.0), Orientation::from_azimuth(0.3)),
            offset: Pose::default(),
        };
        let world = reference.offset_in_scene();
        assert_eq!(world.pos, reference.pose.pos);
        assert_eq!(world.rot, reference.pose.rot);
    }

    #[test]
    fn offset_translation_follows_reference_position() {
        let reference = Reference {
            pose: Pose::new(Position::new(1.0, 0.0, 0.0), Orientation::IDENTITY),
            offset: Pose::new(Position::new(0.0, 0.5, 0.0), Orientation::IDENTITY),
        };
        assert_eq!(reference.offset_in_scene().pos, Position::new(1.0, 0.5, 0.0));
    }
}
