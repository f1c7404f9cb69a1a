//! Per-viewer source subscription filter.
//!
//! A new viewer follows every source. While following everything, a
//! viewer can unsubscribe individual ids to mute them. Subscribing to
//! explicit ids switches it to follow only those; subscribing to `"*"`
//! follows everything again. Reference and loudspeaker events are never
//! filtered.

use std::collections::HashSet;

use crate::domain::{SceneEvent, SourceId};

/// Wildcard id matching every source.
pub const WILDCARD: &str = "*";

/// Source filter for a single viewer connection.
#[derive(Debug)]
pub struct SubscriptionManager {
    /// Followed source ids. Used only while `subscribe_all` is off.
    source_ids: HashSet<SourceId>,
    /// Muted source ids. Used only while `subscribe_all` is on.
    excluded: HashSet<SourceId>,
    /// Whether the viewer follows all sources.
    subscribe_all: bool,
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self {
            source_ids: HashSet::new(),
            excluded: HashSet::new(),
            subscribe_all: true,
        }
    }
}

impl SubscriptionManager {
    /// Creates a filter following all sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Follows the given ids.
    ///
    /// `"*"` follows all sources and forgets every mute. Any other ids
    /// switch the viewer to follow only the listed ids (added to those
    /// already followed). An empty list changes nothing.
    pub fn subscribe(&mut self, ids: &[String]) {
        if ids.iter().any(|id| id == WILDCARD) {
            self.subscribe_all = true;
            self.excluded.clear();
            return;
        }
        if ids.is_empty() {
            return;
        }
        self.subscribe_all = false;
        self.excluded.clear();
        self.source_ids
            .extend(ids.iter().map(|id| SourceId::from(id.as_str())));
    }

    /// Stops following the given ids. `"*"` clears the wildcard.
    ///
    /// While the wildcard is active, the ids are muted instead.
    pub fn unsubscribe(&mut self, ids: &[String]) {
        for id in ids {
            if id == WILDCARD {
                self.subscribe_all = false;
                self.excluded.clear();
            } else if self.subscribe_all {
                self.excluded.insert(SourceId::from(id.as_str()));
            } else {
                self.source_ids.remove(id.as_str());
            }
        }
    }

    /// Returns `true` if the event passes the filter.
    #[must_use]
    pub fn matches(&self, event: &SceneEvent) -> bool {
        match event.source_id() {
            Some(id) if self.subscribe_all => !self.excluded.contains(id),
            Some(id) => self.source_ids.contains(id),
            None => true,
        }
    }

    /// Returns the number of explicitly followed ids.
    #[must_use]
    pub fn count(&self) -> usize {
        self.source_ids.len()
    }

    /// Returns the number of ids muted under the wildcard.
    #[must_use]
    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }

    /// Returns `true` if the wildcard is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{ChangeOrigin, Reference};

    fn deleted(id: &str) -> SceneEvent {
        SceneEvent::SourceDeleted {
            source_id: SourceId::from(id),
            origin: ChangeOrigin::Remote,
            timestamp: Utc::now(),
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn new_viewer_follows_everything() {
        let mgr = SubscriptionManager::new();
        assert!(mgr.matches(&deleted("any")));
    }

    #[test]
    fn explicit_subscription_filters_sources() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&ids(&["a"]));
        assert!(mgr.matches(&deleted("a")));
        assert!(!mgr.matches(&deleted("b")));
        assert_eq!(mgr.count(), 1);
    }

    #[test]
    fn reference_events_always_pass() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&ids(&["a"]));
        let event = SceneEvent::ReferenceChanged {
            reference: Reference::default(),
            origin: ChangeOrigin::Local,
            timestamp: Utc::now(),
        };
        assert!(mgr.matches(&event));
    }

    #[test]
    fn wildcard_round_trip() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&ids(&["a"]));
        assert!(!mgr.is_subscribed_all());
        mgr.subscribe(&ids(&["*"]));
        assert!(mgr.matches(&deleted("zzz")));
        mgr.unsubscribe(&ids(&["*", "a"]));
        assert!(!mgr.matches(&deleted("a")));
        assert_eq!(mgr.count(), 0);
    }

    #[test]
    fn unsubscribe_under_wildcard_mutes_the_source() {
        let mut mgr = SubscriptionManager::new();
        mgr.unsubscribe(&ids(&["a"]));
        assert!(mgr.is_subscribed_all());
        assert!(!mgr.matches(&deleted("a")));
        assert!(mgr.matches(&deleted("b")));
        assert_eq!(mgr.excluded_count(), 1);

        mgr.subscribe(&ids(&["*"]));
        assert!(mgr.matches(&deleted("a")));
        assert_eq!(mgr.excluded_count(), 0);
    }

    #[test]
    fn empty_subscribe_keeps_following_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[]);
        assert!(mgr.is_subscribed_all());
        assert!(mgr.matches(&deleted("a")));

        mgr.subscribe(&ids(&["a"]));
        mgr.subscribe(&[]);
        assert!(mgr.matches(&deleted("a")));
        assert!(!mgr.matches(&deleted("b")));
    }
}
