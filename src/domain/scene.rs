//! In-memory scene: sources, reference, and loudspeakers.
//!
//! [`Scene`] owns the invariants of the data model. Batch operations
//! validate the whole batch before touching any state, so a failing batch
//! leaves the scene exactly as it was.

use std::collections::{BTreeMap, BTreeSet};

use super::{Loudspeaker, Orientation, Position, Reference, Source, SourceAttributes, SourceId};
use crate::error::ClientError;

/// Partial update of the reference and its offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReferenceUpdate {
    /// `ref-pos`
    pub position: Option<Position>,
    /// `ref-rot`
    pub orientation: Option<Orientation>,
    /// `ref-pos-offset`
    pub offset_position: Option<Position>,
    /// `ref-rot-offset`
    pub offset_orientation: Option<Orientation>,
}

impl ReferenceUpdate {
    /// Returns `true` if nothing would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The mirrored renderer scene.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    sources: BTreeMap<SourceId, Source>,
    reference: Reference,
    loudspeakers: Option<Vec<Loudspeaker>>,
}

impl Scene {
    /// Creates an empty scene: no sources, reference at the origin, no
    /// loudspeakers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates one source per entry, each initialized from its attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SourceExists`] if any id is already live; no
    /// source is created in that case.
    pub fn create_sources(
        &mut self,
        batch: &[(SourceId, SourceAttributes)],
    ) -> Result<Vec<Source>, ClientError> {
        let mut seen = BTreeSet::new();
        for (id, _) in batch {
            if self.sources.contains_key(id) || !seen.insert(id) {
                return Err(ClientError::SourceExists(id.clone()));
            }
        }

        let mut created = Vec::with_capacity(batch.len());
        for (id, attrs) in batch {
            let mut source = Source::new(id.clone());
            source.apply(attrs);
            tracing::info!(source_id = %id, "created source");
            self.sources.insert(id.clone(), source.clone());
            created.push(source);
        }
        Ok(created)
    }

    /// Applies each attribute set to its (existing) source.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SourceNotFound`] if any id is not live; no
    /// source is modified in that case.
    pub fn modify_sources(
        &mut self,
        batch: &[(SourceId, SourceAttributes)],
    ) -> Result<Vec<Source>, ClientError> {
        if let Some((missing, _)) = batch.iter().find(|(id, _)| !self.sources.contains_key(id)) {
            return Err(ClientError::SourceNotFound(missing.clone()));
        }

        let mut modified = Vec::with_capacity(batch.len());
        for (id, attrs) in batch {
            if let Some(source) = self.sources.get_mut(id) {
                source.apply(attrs);
                modified.push(source.clone());
            }
        }
        Ok(modified)
    }

    /// Removes the given sources.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SourceNotFound`] if any id is not live or is
    /// listed twice; nothing is removed in that case.
    pub fn delete_sources(&mut self, ids: &[SourceId]) -> Result<(), ClientError> {
        let mut seen = BTreeSet::new();
        for id in ids {
            if !self.sources.contains_key(id) || !seen.insert(id) {
                return Err(ClientError::SourceNotFound(id.clone()));
            }
        }
        for id in ids {
            self.sources.remove(id);
            tracing::info!(source_id = %id, "removed source");
        }
        Ok(())
    }

    /// Creates the loudspeaker set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::LoudspeakersExist`] if the set was already
    /// created.
    pub fn create_loudspeakers(&mut self, loudspeakers: Vec<Loudspeaker>) -> Result<(), ClientError> {
        if self.loudspeakers.is_some() {
            return Err(ClientError::LoudspeakersExist);
        }
        tracing::info!(count = loudspeakers.len(), "created loudspeakers");
        self.loudspeakers = Some(loudspeakers);
        Ok(())
    }

    /// Applies a partial reference update and returns the new reference.
    pub fn update_reference(&mut self, update: &ReferenceUpdate) -> Reference {
        if let Some(pos) = update.position {
            self.reference.pose.pos = pos;
        }
        if let Some(rot) = update.orientation {
            self.reference.pose.rot = rot;
        }
        if let Some(pos) = update.offset_position {
            self.reference.offset.pos = pos;
        }
        if let Some(rot) = update.offset_orientation {
            self.reference.offset.rot = rot;
        }
        self.reference
    }

    /// Looks up a live source.
    #[must_use]
    pub fn source(&self, id: &str) -> Option<&Source> {
        self.sources.get(id)
    }

    /// Returns `true` if the id is live.
    #[must_use]
    pub fn contains_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    /// Iterates over live sources in id order.
    pub fn sources(&self) -> impl Iterator<Item = &Source> {
        self.sources.values()
    }

    /// Number of live sources.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// The reference.
    #[must_use]
    pub const fn reference(&self) -> &Reference {
        &self.reference
    }

    /// The loudspeaker set, empty until created.
    #[must_use]
    pub fn loudspeakers(&self) -> &[Loudspeaker] {
        self.loudspeakers.as_deref().unwrap_or_default()
    }
}
