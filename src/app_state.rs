//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::SceneService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Scene service for all reads and gestures.
    pub scene_service: Arc<SceneService>,
    /// Event bus for viewer WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Builds the state around a service, sharing its event bus.
    #[must_use]
    pub fn new(scene_service: Arc<SceneService>) -> Self {
        let event_bus = scene_service.event_bus().clone();
        Self {
            scene_service,
            event_bus,
        }
    }
}
