//! Service layer: scene ownership, inbound dispatch, and gestures.
//!
//! [`SceneService`] is the single entry point for every scene mutation,
//! whether it comes from the SSR link or from a local operator.

pub mod scene_service;

pub use scene_service::{SceneService, SceneSnapshot};
