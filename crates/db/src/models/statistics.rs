//! Flattened track snapshot rows for the statistics queries.

use radiohub_core::statistics::TrackStats;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TrackStatsRow {
    pub title: String,
    pub cover: String,
    pub rotate: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub listeners: i64,
}

impl From<TrackStatsRow> for TrackStats {
    fn from(row: TrackStatsRow) -> Self {
        TrackStats {
            title: row.title,
            cover: row.cover,
            rotate: row.rotate,
            likes: row.likes,
            dislikes: row.dislikes,
            listeners: row.listeners,
        }
    }
}
