//! Pose DTOs shared by scene responses and gesture requests.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Orientation, Pose, Position};
use crate::error::ClientError;

/// A pose as number lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PoseDto {
    /// `[x, y, z]`
    pub pos: Vec<f64>,
    /// `[x, y, z, w]`
    pub rot: Vec<f64>,
}

impl From<Pose> for PoseDto {
    fn from(pose: Pose) -> Self {
        Self {
            pos: pose.pos.to_array().to_vec(),
            rot: pose.rot.to_array().to_vec(),
        }
    }
}

/// Request body of the gesture endpoints.
///
/// At least one of `pos` and `rot` must be present.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PoseUpdateRequest {
    /// New position, `[x, y]` or `[x, y, z]`.
    #[serde(default)]
    pub pos: Option<Vec<f64>>,
    /// New orientation quaternion, `[x, y, z, w]`.
    #[serde(default)]
    pub rot: Option<Vec<f64>>,
}

impl PoseUpdateRequest {
    /// Validates the arities and converts to domain types.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] on a wrong arity.
    pub fn into_parts(self) -> Result<(Option<Position>, Option<Orientation>), ClientError> {
        let pos = self
            .pos
            .map(Position::try_from)
            .transpose()
            .map_err(|err| ClientError::InvalidRequest(format!("pos: {err}")))?;
        let rot = self
            .rot
            .map(Orientation::try_from)
            .transpose()
            .map_err(|err| ClientError::InvalidRequest(format!("rot: {err}")))?;
        Ok((pos, rot))
    }
}
