//! Domain layer: scene model, poses, and the event system.
//!
//! This module contains the mirrored scene (sources, reference,
//! loudspeakers), the pose math needed to place entities relative to the
//! reference, and the event bus that broadcasts every scene mutation.

pub mod event_bus;
pub mod loudspeaker;
pub mod pose;
pub mod reference;
pub mod scene;
pub mod scene_event;
pub mod source;
pub mod source_id;

pub use event_bus::EventBus;
pub use loudspeaker::Loudspeaker;
pub use pose::{Orientation, Pose, Position};
pub use reference::Reference;
pub use scene::{ReferenceUpdate, Scene};
pub use scene_event::{ChangeOrigin, SceneEvent};
pub use source::{Source, SourceAttributes};
pub use source_id::SourceId;
