//! Read-only ranked views over the `tracks` table.

use radiohub_core::statistics::{Ranking, StatisticsCategory, TrackStats, TOP_N};
use sqlx::{PgConnection, PgPool};

use crate::models::statistics::TrackStatsRow;

const COLUMNS: &str = "title, cover, rotate, likes, dislikes, listeners";

/// Provides the ranked track lists.
pub struct StatisticsRepo;

impl StatisticsRepo {
    /// All five rankings, read from one consistent snapshot.
    pub async fn all(pool: &PgPool) -> Result<Vec<StatisticsCategory>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let mut categories = Vec::with_capacity(Ranking::ALL.len());
        for ranking in Ranking::ALL {
            let tracks = Self::fetch(&mut tx, ranking, TOP_N).await?;
            categories.push(StatisticsCategory::new(ranking, tracks));
        }

        tx.commit().await?;
        Ok(categories)
    }

    async fn fetch(
        conn: &mut PgConnection,
        ranking: Ranking,
        limit: i64,
    ) -> Result<Vec<TrackStats>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks {} LIMIT $1", Self::clause(ranking));
        let rows = sqlx::query_as::<_, TrackStatsRow>(&query)
            .bind(limit)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.into_iter().map(TrackStats::from).collect())
    }

    fn clause(ranking: Ranking) -> &'static str {
        match ranking {
            Ranking::History => "ORDER BY created_at DESC",
            Ranking::Listeners => "WHERE listeners > 0 ORDER BY listeners DESC",
            Ranking::Rotations => "ORDER BY rotate DESC",
            Ranking::Likes => "WHERE likes > 0 ORDER BY likes DESC",
            Ranking::Dislikes => "WHERE dislikes > 0 ORDER BY dislikes DESC",
        }
    }
}
