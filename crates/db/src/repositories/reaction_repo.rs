//! Repository for the `reactions` table.

use radiohub_core::reaction::{Reaction, ReactionType, UserId};
use radiohub_core::track::{Track, TrackId};
use sqlx::PgPool;

use crate::models::reaction::ReactionRow;
use crate::repositories::TrackRepo;

const COLUMNS: &str = "id, user_id, track_id, reaction, created_at";

/// Result of [`ReactionRepo::add`].
#[derive(Debug)]
pub enum ReactionInsert {
    /// Stored; the track counter was incremented in the same transaction.
    /// The returned aggregate holds the pending `ReactionAdded` event.
    Inserted(Track),
    /// The user already has a reaction on this track. Nothing changed.
    AlreadyReacted,
    /// The track does not exist. Nothing changed.
    TrackMissing,
}

/// Provides persistence for reactions.
pub struct ReactionRepo;

impl ReactionRepo {
    /// Insert a reaction and bump the matching track counter atomically.
    ///
    /// The insert itself is the uniqueness check: a conflicting
    /// `(user_id, track_id)` pair inserts nothing and leaves the counters
    /// untouched.
    pub async fn add(pool: &PgPool, reaction: &Reaction) -> Result<ReactionInsert, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(mut track) = TrackRepo::lock(&mut tx, &reaction.track_id).await? else {
            return Ok(ReactionInsert::TrackMissing);
        };

        let inserted = sqlx::query(
            "INSERT INTO reactions (user_id, track_id, reaction, created_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_reactions_user_track DO NOTHING",
        )
        .bind(reaction.user_id.as_str())
        .bind(reaction.track_id.as_str())
        .bind(reaction.reaction.as_str())
        .bind(reaction.created_at)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            return Ok(ReactionInsert::AlreadyReacted);
        }

        track.record_reaction(&reaction.user_id, reaction.reaction);
        TrackRepo::save(&mut tx, &track).await?;

        tx.commit().await?;
        Ok(ReactionInsert::Inserted(track))
    }

    /// Find the reaction a user left on a track, if any.
    pub async fn find(
        pool: &PgPool,
        user_id: &UserId,
        track_id: &TrackId,
    ) -> Result<Option<Reaction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reactions WHERE user_id = $1 AND track_id = $2");
        sqlx::query_as::<_, ReactionRow>(&query)
            .bind(user_id.as_str())
            .bind(track_id.as_str())
            .fetch_optional(pool)
            .await?
            .map(ReactionRow::into_reaction)
            .transpose()
    }

    /// Just the reaction type, for the "has reacted" check.
    pub async fn find_type(
        pool: &PgPool,
        user_id: &UserId,
        track_id: &TrackId,
    ) -> Result<Option<ReactionType>, sqlx::Error> {
        Ok(Self::find(pool, user_id, track_id)
            .await?
            .map(|reaction| reaction.reaction))
    }
}
