//! Repository for the `tracks` table.

use radiohub_core::track::{Cover, Title, Track, TrackId};
use sqlx::{PgConnection, PgPool};

use crate::models::domain_decode_error;
use crate::models::track::TrackRow;

const COLUMNS: &str = "\
    id, title, cover, rotate, likes, dislikes, listeners, created_at, updated_at";

/// Provides persistence for the track aggregate.
pub struct TrackRepo;

impl TrackRepo {
    /// Find a track by id.
    pub async fn find_by_id(pool: &PgPool, id: &TrackId) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, TrackRow>(&query)
            .bind(id.as_str())
            .fetch_optional(pool)
            .await?
            .map(TrackRow::into_aggregate)
            .transpose()
    }

    /// Whether a track with this id is known.
    pub async fn exists(pool: &PgPool, id: &TrackId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tracks WHERE id = $1)")
            .bind(id.as_str())
            .fetch_one(pool)
            .await
    }

    /// Record an occurrence of a track on the stream.
    ///
    /// First occurrence creates the row with `rotate = 1`. Every later one
    /// increments `rotate` and fills the cover only if the stored one is
    /// empty; the stored title is never overwritten. Concurrent calls for
    /// the same id serialize on the row lock, so N calls always yield
    /// `rotate = N`.
    ///
    /// The returned aggregate still holds its pending domain events.
    pub async fn upsert(
        pool: &PgPool,
        id: TrackId,
        title: Title,
        cover: Cover,
    ) -> Result<Track, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(track) = Self::lock(&mut tx, &id).await? {
            let track = Self::reoccur(&mut tx, track, cover).await?;
            tx.commit().await?;
            return Ok(track);
        }

        let track = Track::create(id, title, cover);
        let state = track.state();
        let inserted = sqlx::query(
            "INSERT INTO tracks \
                (id, title, cover, rotate, likes, dislikes, listeners, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&state.id)
        .bind(&state.title)
        .bind(&state.cover)
        .bind(state.rotate)
        .bind(state.likes)
        .bind(state.dislikes)
        .bind(state.listeners)
        .bind(state.created_at)
        .bind(state.updated_at)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 1 {
            tx.commit().await?;
            return Ok(track);
        }

        // A concurrent first occurrence committed between our lookup and
        // insert. The row is visible now; treat this call as a re-occurrence.
        let existing = Self::lock(&mut tx, track.id())
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let track = Self::reoccur(&mut tx, existing, track.cover().clone()).await?;
        tx.commit().await?;
        Ok(track)
    }

    /// Store a fresh unique-listener count for a track.
    ///
    /// Returns `None` when the track does not exist.
    pub async fn update_listener_count(
        pool: &PgPool,
        id: &TrackId,
        listeners: i64,
    ) -> Result<Option<Track>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(mut track) = Self::lock(&mut tx, id).await? else {
            return Ok(None);
        };
        track
            .set_listener_count(listeners)
            .map_err(domain_decode_error)?;
        Self::save(&mut tx, &track).await?;

        tx.commit().await?;
        Ok(Some(track))
    }

    // -----------------------------------------------------------------------
    // Transaction helpers
    // -----------------------------------------------------------------------

    /// Load and row-lock a track inside an open transaction.
    ///
    /// `FOR NO KEY UPDATE` serializes counter writers while leaving the
    /// `FOR KEY SHARE` lock taken by foreign-key checks on `listeners` and
    /// `reactions` inserts free to proceed.
    pub(crate) async fn lock(
        conn: &mut PgConnection,
        id: &TrackId,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1 FOR NO KEY UPDATE");
        sqlx::query_as::<_, TrackRow>(&query)
            .bind(id.as_str())
            .fetch_optional(&mut *conn)
            .await?
            .map(TrackRow::into_aggregate)
            .transpose()
    }

    /// Write back the mutable columns of a locked track.
    pub(crate) async fn save(conn: &mut PgConnection, track: &Track) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE tracks SET \
                cover = $2, rotate = $3, likes = $4, dislikes = $5, \
                listeners = $6, updated_at = $7 \
             WHERE id = $1",
        )
        .bind(track.id().as_str())
        .bind(track.cover().as_str())
        .bind(track.rotate())
        .bind(track.likes())
        .bind(track.dislikes())
        .bind(track.listeners())
        .bind(track.updated_at())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn reoccur(
        conn: &mut PgConnection,
        mut track: Track,
        cover: Cover,
    ) -> Result<Track, sqlx::Error> {
        track.increment_rotation();
        track.update_cover_if_empty(cover);
        Self::save(conn, &track).await?;
        Ok(track)
    }
}
