//! Domain events and the publishing seam.
//!
//! Aggregates record [`DomainEvent`]s; use cases hand them to an
//! [`EventPublisher`] once the owning transaction has committed. The
//! concrete fan-out lives in `radiohub-events`.

use chrono::Utc;
use serde::Serialize;

use crate::reaction::ReactionType;
use crate::track::TrackId;
use crate::types::Timestamp;

/// Event-specific data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    TrackCreated { title: String, cover: String },
    TrackRotated { rotate: i64 },
    CoverUpdated { old_cover: String, new_cover: String },
    ReactionAdded { user_id: String, reaction: ReactionType },
    ListenerCountUpdated { listeners: i64 },
}

/// Something that happened to a track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainEvent {
    pub track_id: TrackId,
    #[serde(flatten)]
    pub kind: EventKind,
    pub occurred_at: Timestamp,
}

impl DomainEvent {
    pub fn new(track_id: TrackId, kind: EventKind) -> Self {
        Self {
            track_id,
            kind,
            occurred_at: Utc::now(),
        }
    }

    /// Dot-separated event name, e.g. `"track.rotated"`.
    pub fn name(&self) -> &'static str {
        match self.kind {
            EventKind::TrackCreated { .. } => "track.created",
            EventKind::TrackRotated { .. } => "track.rotated",
            EventKind::CoverUpdated { .. } => "track.cover_updated",
            EventKind::ReactionAdded { .. } => "reaction.added",
            EventKind::ListenerCountUpdated { .. } => "track.listeners_updated",
        }
    }
}

/// Outbound boundary for domain events.
///
/// Contract: publishing is best-effort and infallible from the caller's
/// point of view. An implementation that cannot deliver (no subscribers,
/// full buffer, closed channel) drops the event and logs; it never fails or
/// blocks the operation that produced it.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: DomainEvent);

    fn publish_all(&self, events: Vec<DomainEvent>) {
        for event in events {
            self.publish(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recording(Mutex<Vec<&'static str>>);

    impl EventPublisher for Recording {
        fn publish(&self, event: DomainEvent) {
            self.0.lock().unwrap().push(event.name());
        }
    }

    fn track_id() -> TrackId {
        TrackId::parse("0123456789abcdef0123456789abcdef").unwrap()
    }

    #[test]
    fn publish_all_forwards_in_order() {
        let publisher = Recording::default();
        publisher.publish_all(vec![
            DomainEvent::new(track_id(), EventKind::TrackRotated { rotate: 2 }),
            DomainEvent::new(track_id(), EventKind::ListenerCountUpdated { listeners: 1 }),
        ]);
        assert_eq!(
            *publisher.0.lock().unwrap(),
            vec!["track.rotated", "track.listeners_updated"]
        );
    }

    #[test]
    fn serializes_flat_with_kind_tag() {
        let event = DomainEvent::new(
            track_id(),
            EventKind::ReactionAdded {
                user_id: "u1".into(),
                reaction: ReactionType::Like,
            },
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"reaction_added\""));
        assert!(json.contains("\"reaction\":\"like\""));
        assert!(json.contains("\"track_id\":\"0123456789abcdef0123456789abcdef\""));
    }
}
