//! Repository for the `listeners` table (listener sightings).

use radiohub_core::reaction::UserId;
use radiohub_core::track::TrackId;
use sqlx::PgPool;

/// Provides persistence for listener sightings.
pub struct ListenerRepo;

impl ListenerRepo {
    /// Record that a user was seen listening to a track.
    ///
    /// Idempotent per `(user_id, track_id)`: returns `false` if the pair
    /// was already recorded.
    pub async fn record_sighting(
        pool: &PgPool,
        user_id: &UserId,
        track_id: &TrackId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO listeners (user_id, track_id) VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_listeners_user_track DO NOTHING",
        )
        .bind(user_id.as_str())
        .bind(track_id.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of distinct users ever seen listening to a track.
    pub async fn unique_count(pool: &PgPool, track_id: &TrackId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT user_id) FROM listeners WHERE track_id = $1",
        )
        .bind(track_id.as_str())
        .fetch_one(pool)
        .await
    }
}
