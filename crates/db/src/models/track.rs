//! Track row model.

use radiohub_core::track::{Track, TrackState};
use radiohub_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

use super::domain_decode_error;

/// A row from the `tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrackRow {
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

impl From<TrackRow> for TrackState {
    fn from(row: TrackRow) -> Self {
        TrackState {
            id: row.id,
            title: row.title,
            cover: row.cover,
            rotate: row.rotate,
            likes: row.likes,
            dislikes: row.dislikes,
            listeners: row.listeners,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl TrackRow {
    /// Re-hydrate the aggregate. No domain events are produced.
    pub fn into_aggregate(self) -> Result<Track, sqlx::Error> {
        Track::rehydrate(self.into()).map_err(domain_decode_error)
    }
}
