//! Data Transfer Objects for REST request/response serialization.
//!
//! Positions and orientations are plain number lists, the same shape
//! they have on the SSR wire.

pub mod pose_dto;
pub mod scene_dto;

pub use pose_dto::*;
pub use scene_dto::*;
