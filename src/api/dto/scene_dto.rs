//! Scene DTOs for snapshot and source endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use super::PoseDto;
use crate::domain::{Loudspeaker, Reference, Source};
use crate::service::SceneSnapshot;

/// One source as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SourceDto {
    /// Source id.
    pub id: String,
    /// `[x, y, z]`
    pub pos: Vec<f64>,
    /// `[x, y, z, w]`
    pub rot: Vec<f64>,
    /// Whether the source is shown.
    pub active: bool,
    /// Human-readable name.
    pub name: Option<String>,
    /// Source model.
    pub model: Option<String>,
    /// Linear volume factor.
    pub volume: f64,
    /// Mute state.
    pub mute: bool,
    /// Fixed state.
    pub fixed: bool,
}

impl From<Source> for SourceDto {
    fn from(src: Source) -> Self {
        Self {
            id: src.id.to_string(),
            pos: src.position.to_array().to_vec(),
            rot: src.orientation.to_array().to_vec(),
            active: src.active,
            name: src.name,
            model: src.model,
            volume: src.volume,
            mute: src.mute,
            fixed: src.fixed,
        }
    }
}

/// Reference with its offset, both relative and resolved.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReferenceDto {
    /// `[x, y, z]`
    pub pos: Vec<f64>,
    /// `[x, y, z, w]`
    pub rot: Vec<f64>,
    /// Offset relative to the reference.
    pub offset: PoseDto,
    /// Offset in scene coordinates.
    pub offset_in_scene: PoseDto,
}

impl From<Reference> for ReferenceDto {
    fn from(reference: Reference) -> Self {
        let pose = PoseDto::from(reference.pose);
        Self {
            pos: pose.pos,
            rot: pose.rot,
            offset: reference.offset.into(),
            offset_in_scene: reference.offset_in_scene().into(),
        }
    }
}

/// One loudspeaker with its resolved scene pose.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoudspeakerDto {
    /// Pose relative to the reference.
    pub relative: PoseDto,
    /// Pose in scene coordinates.
    pub in_scene: PoseDto,
    /// Loudspeaker model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl LoudspeakerDto {
    fn resolve(loudspeaker: Loudspeaker, reference: &Reference) -> Self {
        let relative = loudspeaker.pose();
        Self {
            relative: relative.into(),
            in_scene: reference.to_scene(&relative).into(),
            model: loudspeaker.model,
        }
    }
}

/// Response body for `GET /scene`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SceneDto {
    /// Whether the SSR link is up.
    pub connected: bool,
    /// Reference and offset.
    pub reference: ReferenceDto,
    /// Loudspeakers (empty until the renderer sends them).
    pub loudspeakers: Vec<LoudspeakerDto>,
    /// Live sources in id order.
    pub sources: Vec<SourceDto>,
}

impl SceneDto {
    /// Builds the DTO from a service snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: SceneSnapshot, connected: bool) -> Self {
        let reference = snapshot.reference;
        Self {
            connected,
            reference: reference.into(),
            loudspeakers: snapshot
                .loudspeakers
                .into_iter()
                .map(|ls| LoudspeakerDto::resolve(ls, &reference))
                .collect(),
            sources: snapshot.sources.into_iter().map(SourceDto::from).collect(),
        }
    }
}
