//! Positions, quaternion orientations, and their composition.
//!
//! On the wire a [`Position`] is a list of 2 or 3 numbers (a missing `z`
//! means 0) and an [`Orientation`] is a list of exactly 4 numbers in
//! `[x, y, z, w]` order. Both serialize back to their full-arity lists.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in scene coordinates (metres).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 3]")]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Position {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a position from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinates as an `[x, y, z]` array.
    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

/// Error returned when a coordinate list has the wrong arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArityError {
    expected: &'static str,
    found: usize,
}

impl fmt::Display for ArityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected a list of {} numbers, found {}",
            self.expected, self.found
        )
    }
}

impl std::error::Error for ArityError {}

impl TryFrom<Vec<f64>> for Position {
    type Error = ArityError;

    fn try_from(coords: Vec<f64>) -> Result<Self, Self::Error> {
        match coords.as_slice() {
            &[x, y] => Ok(Self::new(x, y, 0.0)),
            &[x, y, z] => Ok(Self::new(x, y, z)),
            other => Err(ArityError {
                expected: "2 or 3",
                found: other.len(),
            }),
        }
    }
}

impl From<Position> for [f64; 3] {
    fn from(p: Position) -> Self {
        p.to_array()
    }
}

/// A rotation stored as a unit quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 4]")]
pub struct Orientation {
    /// Quaternion x component.
    pub x: f64,
    /// Quaternion y component.
    pub y: f64,
    /// Quaternion z component.
    pub z: f64,
    /// Quaternion w (scalar) component.
    pub w: f64,
}

impl Orientation {
    /// No rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates an orientation from raw quaternion components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation by `angle` radians around the z axis (azimuth).
    #[must_use]
    pub fn from_azimuth(angle: f64) -> Self {
        let half = angle / 2.0;
        Self::new(0.0, 0.0, half.sin(), half.cos())
    }

    /// Returns the components as an `[x, y, z, w]` array.
    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Hamilton product `self * rhs` (apply `rhs` first, then `self`).
    #[must_use]
    pub fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self, rhs);
        Self::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }

    /// Rotates a vector by this quaternion.
    #[must_use]
    pub fn rotate(self, v: Position) -> Position {
        // t = 2 * (q.xyz × v); v' = v + w * t + q.xyz × t
        let tx = 2.0 * (self.y * v.z - self.z * v.y);
        let ty = 2.0 * (self.z * v.x - self.x * v.z);
        let tz = 2.0 * (self.x * v.y - self.y * v.x);
        Position::new(
            v.x + self.w * tx + (self.y * tz - self.z * ty),
            v.y + self.w * ty + (self.z * tx - self.x * tz),
            v.z + self.w * tz + (self.x * ty - self.y * tx),
        )
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<Vec<f64>> for Orientation {
    type Error = ArityError;

    fn try_from(components: Vec<f64>) -> Result<Self, Self::Error> {
        match components.as_slice() {
            &[x, y, z, w] => Ok(Self::new(x, y, z, w)),
            other => Err(ArityError {
                expected: "4",
                found: other.len(),
            }),
        }
    }
}

impl From<Orientation> for [f64; 4] {
    fn from(q: Orientation) -> Self {
        q.to_array()
    }
}

/// Position plus orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Position.
    pub pos: Position,
    /// Orientation.
    pub rot: Orientation,
}

impl Pose {
    /// Creates a pose.
    #[must_use]
    pub const fn new(pos: Position, rot: Orientation) -> Self {
        Self { pos, rot }
    }

    /// Expresses `child` (given relative to `self`) in the parent frame.
    #[must_use]
    pub fn compose(&self, child: &Self) -> Self {
        Self {
            pos: self.pos.add(self.rot.rotate(child.pos)),
            rot: self.rot.mul(child.rot),
        }
    }
}
