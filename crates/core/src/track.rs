//! Track aggregate and its value types.
//!
//! A [`Track`] is identified by a [`TrackId`] (an MD5-format content hash
//! taken from the stream title) and carries the counters every other part of
//! the system updates: rotations, likes, dislikes and the current unique
//! listener count. All mutation goes through the aggregate so the counter
//! invariants hold no matter which caller (upsert, reaction, listener
//! tracking) is driving it.

use std::fmt;

use chrono::Utc;
use serde::Serialize;

use crate::error::CoreError;
use crate::events::{DomainEvent, EventKind};
use crate::reaction::{ReactionType, UserId};
use crate::types::Timestamp;

/// Length of an MD5 hex digest.
pub const TRACK_ID_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// 32 hexadecimal characters, either case. Never empty once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Validate and wrap a raw identifier.
    ///
    /// The value is stored as given (case is preserved), matching the form
    /// the ingestion path submits it in.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        if value.len() == TRACK_ID_LEN && value.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(CoreError::Validation(format!(
                "track id must be {TRACK_ID_LEN} hexadecimal characters"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty track title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("title cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trimmed cover artwork URL. Empty means "no cover yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cover(String);

impl Cover {
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// TrackState
// ---------------------------------------------------------------------------

/// Plain persisted form of a track.
///
/// Used to re-hydrate an aggregate from storage and as the read model handed
/// to callers. Carries raw strings so storage adapters need no domain types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackState {
    pub id: String,
    pub title: String,
    pub cover: String,
    pub rotate: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub listeners: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Track aggregate
// ---------------------------------------------------------------------------

/// Aggregate root for a played track.
#[derive(Debug, Clone)]
pub struct Track {
    id: TrackId,
    title: Title,
    cover: Cover,
    rotate: i64,
    likes: i64,
    dislikes: i64,
    listeners: i64,
    created_at: Timestamp,
    updated_at: Timestamp,
    pending_events: Vec<DomainEvent>,
}

impl Track {
    /// Create a brand-new track: rotate=1, every other counter 0.
    ///
    /// Emits `TrackCreated`.
    pub fn create(id: TrackId, title: Title, cover: Cover) -> Self {
        let now = Utc::now();
        let mut track = Self {
            id,
            title,
            cover,
            rotate: 1,
            likes: 0,
            dislikes: 0,
            listeners: 0,
            created_at: now,
            updated_at: now,
            pending_events: Vec::new(),
        };
        track.record_event(EventKind::TrackCreated {
            title: track.title.as_str().to_string(),
            cover: track.cover.as_str().to_string(),
        });
        track
    }

    /// Rebuild an aggregate from storage. No events are emitted.
    ///
    /// Rejects states that could never have been produced by the aggregate
    /// itself (bad id, empty title, rotate < 1, negative counters).
    pub fn rehydrate(state: TrackState) -> Result<Self, CoreError> {
        let id = TrackId::parse(&state.id)?;
        let title = Title::parse(&state.title)?;

        if state.rotate < 1 {
            return Err(CoreError::Validation(format!(
                "track {id} has rotate {} (must be >= 1)",
                state.rotate
            )));
        }
        if state.likes < 0 || state.dislikes < 0 || state.listeners < 0 {
            return Err(CoreError::Validation(format!(
                "track {id} has a negative counter"
            )));
        }

        Ok(Self {
            id,
            title,
            cover: Cover::new(&state.cover),
            rotate: state.rotate,
            likes: state.likes,
            dislikes: state.dislikes,
            listeners: state.listeners,
            created_at: state.created_at,
            updated_at: state.updated_at,
            pending_events: Vec::new(),
        })
    }

    /// The track re-occurred: bump the rotation count.
    pub fn increment_rotation(&mut self) {
        self.rotate += 1;
        self.touch();
        self.record_event(EventKind::TrackRotated {
            rotate: self.rotate,
        });
    }

    /// First non-empty cover wins; later submissions never overwrite it.
    ///
    /// Returns `true` if the cover changed.
    pub fn update_cover_if_empty(&mut self, new_cover: Cover) -> bool {
        if !self.cover.is_empty() || new_cover.is_empty() {
            return false;
        }

        let old_cover = std::mem::replace(&mut self.cover, new_cover);
        self.touch();
        self.record_event(EventKind::CoverUpdated {
            old_cover: old_cover.as_str().to_string(),
            new_cover: self.cover.as_str().to_string(),
        });
        true
    }

    /// Increment likes by exactly one. Callers guarantee one call per user.
    pub fn record_like(&mut self) {
        self.likes += 1;
        self.touch();
    }

    /// Increment dislikes by exactly one. Callers guarantee one call per user.
    pub fn record_dislike(&mut self) {
        self.dislikes += 1;
        self.touch();
    }

    /// Apply a freshly stored reaction and record `ReactionAdded`.
    pub fn record_reaction(&mut self, user_id: &UserId, reaction: ReactionType) {
        match reaction {
            ReactionType::Like => self.record_like(),
            ReactionType::Dislike => self.record_dislike(),
        }
        self.record_event(EventKind::ReactionAdded {
            user_id: user_id.as_str().to_string(),
            reaction,
        });
    }

    /// Replace (not accumulate) the current unique listener count.
    pub fn set_listener_count(&mut self, count: i64) -> Result<(), CoreError> {
        if count < 0 {
            return Err(CoreError::Validation(format!(
                "listener count cannot be negative (got {count})"
            )));
        }
        self.listeners = count;
        self.touch();
        self.record_event(EventKind::ListenerCountUpdated { listeners: count });
        Ok(())
    }

    /// Drain the events recorded since creation / re-hydration.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.pending_events)
    }

    #[cfg(test)]
    pub(crate) fn has_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Snapshot of the current persisted fields.
    pub fn state(&self) -> TrackState {
        TrackState {
            id: self.id.as_str().to_string(),
            title: self.title.as_str().to_string(),
            cover: self.cover.as_str().to_string(),
            rotate: self.rotate,
            likes: self.likes,
            dislikes: self.dislikes,
            listeners: self.listeners,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn id(&self) -> &TrackId {
        &self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn cover(&self) -> &Cover {
        &self.cover
    }

    pub fn rotate(&self) -> i64 {
        self.rotate
    }

    pub fn likes(&self) -> i64 {
        self.likes
    }

    pub fn dislikes(&self) -> i64 {
        self.dislikes
    }

    pub fn listeners(&self) -> i64 {
        self.listeners
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    fn touch(&mut self) {
        // Never move backwards, even if the wall clock does.
        self.updated_at = Utc::now().max(self.updated_at);
    }

    fn record_event(&mut self, kind: EventKind) {
        self.pending_events
            .push(DomainEvent::new(self.id.clone(), kind));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
