//! Sound sources and the partial updates applied to them.

use serde::Serialize;

use super::{Orientation, Position, SourceId};

/// A movable sound-emitting point in the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Source {
    /// Unique id (immutable after creation).
    pub id: SourceId,
    /// Position in scene coordinates.
    #[serde(rename = "pos")]
    pub position: Position,
    /// Orientation quaternion.
    #[serde(rename = "rot")]
    pub orientation: Orientation,
    /// Whether the source is shown. Inactive sources stay in the scene.
    pub active: bool,
    /// Human-readable name.
    pub name: Option<String>,
    /// Source model, e.g. `"point"` or `"plane"`.
    pub model: Option<String>,
    /// Linear volume factor.
    pub volume: f64,
    /// Mute state.
    pub mute: bool,
    /// Fixed sources do not move with the reference.
    pub fixed: bool,
}

impl Source {
    /// Creates a source at the origin with default attributes.
    #[must_use]
    pub fn new(id: SourceId) -> Self {
        Self {
            id,
            position: Position::ORIGIN,
            orientation: Orientation::IDENTITY,
            active: true,
            name: None,
            model: None,
            volume: 1.0,
            mute: false,
            fixed: false,
        }
    }

    /// Overwrites every attribute present in `attrs`.
    pub fn apply(&mut self, attrs: &SourceAttributes) {
        if let Some(pos) = attrs.position {
            self.position = pos;
        }
        if let Some(rot) = attrs.orientation {
            self.orientation = rot;
        }
        if let Some(active) = attrs.active {
            self.active = active;
        }
        if let Some(name) = &attrs.name {
            self.name = Some(name.clone());
        }
        if let Some(model) = &attrs.model {
            self.model = Some(model.clone());
        }
        if let Some(volume) = attrs.volume {
            self.volume = volume;
        }
        if let Some(mute) = attrs.mute {
            self.mute = mute;
        }
        if let Some(fixed) = attrs.fixed {
            self.fixed = fixed;
        }
    }
}

/// A partial source update as carried by `new-src` and `mod-src`.
///
/// `None` leaves the attribute untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceAttributes {
    /// `pos`
    pub position: Option<Position>,
    /// `rot`
    pub orientation: Option<Orientation>,
    /// `active`
    pub active: Option<bool>,
    /// `name`
    pub name: Option<String>,
    /// `model`
    pub model: Option<String>,
    /// `volume`
    pub volume: Option<f64>,
    /// `mute`
    pub mute: Option<bool>,
    /// `fixed`
    pub fixed: Option<bool>,
}

impl SourceAttributes {
    /// Attributes carrying only a pose change.
    #[must_use]
    pub fn pose(position: Option<Position>, orientation: Option<Orientation>) -> Self {
        Self {
            position,
            orientation,
            ..Self::default()
        }
    }

    /// Returns `true` if no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_source_is_visible_at_origin() {
        let src = Source::new(SourceId::from("a"));
        assert!(src.active);
        assert_eq!(src.position, Position::ORIGIN);
        assert_eq!(src.orientation, Orientation::IDENTITY);
        assert!((src.volume - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn apply_touches_only_present_attributes() {
        let mut src = Source::new(SourceId::from("a"));
        src.apply(&SourceAttributes {
            name: Some("Vocals".to_string()),
            mute: Some(true),
            ..SourceAttributes::default()
        });
        src.apply(&SourceAttributes::pose(Some(Position::new(1.0, 2.0, 0.0)), None));

        assert_eq!(src.name.as_deref(), Some("Vocals"));
        assert!(src.mute);
        assert_eq!(src.position, Position::new(1.0, 2.0, 0.0));
        assert_eq!(src.orientation, Orientation::IDENTITY);
    }

    #[test]
    fn deactivated_source_keeps_pose() {
        let mut src = Source::new(SourceId::from("a"));
        src.apply(&SourceAttributes::pose(Some(Position::new(3.0, 0.0, 1.0)), None));
        src.apply(&SourceAttributes {
            active: Some(false),
            ..SourceAttributes::default()
        });
        assert!(!src.active);
        assert_eq!(src.position, Position::new(3.0, 0.0, 1.0));
    }

    #[test]
    fn empty_attributes() {
        assert!(SourceAttributes::default().is_empty());
        assert!(!SourceAttributes::pose(None, Some(Orientation::IDENTITY)).is_empty());
    }
}
