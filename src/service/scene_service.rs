//! Scene service: the single owner of the mirrored scene.
//!
//! Both writers go through [`SceneService`]: the SSR link applies inbound
//! messages via [`SceneService::handle_message`], and the local API applies
//! operator gestures via [`SceneService::apply_gesture`]. Every mutation
//! holds the scene's write lock for the whole command and publishes its
//! events afterwards.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use crate::domain::{ChangeOrigin, EventBus, Loudspeaker, Reference, Scene, SceneEvent, Source};
use crate::error::ClientError;
use crate::protocol::{Gesture, Notifier, apply_command, decode_message};

/// Point-in-time copy of the whole scene.
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    /// Reference and offset.
    pub reference: Reference,
    /// Loudspeakers relative to the reference (empty until created).
    pub loudspeakers: Vec<Loudspeaker>,
    /// Live sources in id order.
    pub sources: Vec<Source>,
}

/// Business logic around the scene, the event bus, and the notifier.
#[derive(Debug)]
pub struct SceneService {
    scene: RwLock<Scene>,
    event_bus: EventBus,
    notifier: Notifier,
    connected: AtomicBool,
}

impl SceneService {
    /// Creates a service with an empty scene.
    #[must_use]
    pub fn new(event_bus: EventBus, notifier: Notifier) -> Self {
        Self {
            scene: RwLock::new(Scene::new()),
            event_bus,
            notifier,
            connected: AtomicBool::new(false),
        }
    }

    /// Returns a reference to the event bus.
    #[must_use]
    pub const fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Records whether the SSR link is up.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }

    /// Returns `true` while the SSR link is up.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    /// Decodes an inbound message and applies its commands in order.
    ///
    /// Returns the number of commands applied.
    ///
    /// # Errors
    ///
    /// Returns the first decoding or scene error. A malformed message
    /// changes nothing; on a scene error, commands before the failing one
    /// stay applied.
    pub async fn handle_message(&self, text: &str) -> Result<usize, ClientError> {
        let commands = decode_message(text)?;
        let mut scene = self.scene.write().await;
        for command in &commands {
            let events = apply_command(&mut scene, command, ChangeOrigin::Remote)?;
            self.publish(events);
        }
        Ok(commands.len())
    }

    /// Applies a completed operator gesture locally and notifies the SSR.
    ///
    /// Exactly one outbound message is queued per successful gesture.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] for an empty gesture and
    /// [`ClientError::SourceNotFound`] for an unknown source; nothing is
    /// sent in either case.
    pub async fn apply_gesture(&self, gesture: Gesture) -> Result<Vec<SceneEvent>, ClientError> {
        let command = gesture.into_command()?;
        let events = {
            let mut scene = self.scene.write().await;
            apply_command(&mut scene, &command, ChangeOrigin::Local)?
        };
        self.notifier.send(std::slice::from_ref(&command));
        self.publish(events.clone());
        Ok(events)
    }

    /// Returns a copy of one source.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SourceNotFound`] if the id is not live.
    pub async fn source(&self, id: &str) -> Result<Source, ClientError> {
        self.scene
            .read()
            .await
            .source(id)
            .cloned()
            .ok_or_else(|| ClientError::SourceNotFound(id.into()))
    }

    /// Returns copies of all live sources in id order.
    pub async fn sources(&self) -> Vec<Source> {
        self.scene.read().await.sources().cloned().collect()
    }

    /// Returns the current reference.
    pub async fn reference(&self) -> Reference {
        *self.scene.read().await.reference()
    }

    /// Returns a copy of the whole scene.
    pub async fn snapshot(&self) -> SceneSnapshot {
        let scene = self.scene.read().await;
        SceneSnapshot {
            reference: *scene.reference(),
            loudspeakers: scene.loudspeakers().to_vec(),
            sources: scene.sources().cloned().collect(),
        }
    }

    fn publish(&self, events: Vec<SceneEvent>) {
        for event in events {
            tracing::debug!(event_type = event.event_type_str(), "scene event");
            let _ = self.event_bus.publish(event);
        }
    }
}
