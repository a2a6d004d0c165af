//! Reaction row model.

use radiohub_core::reaction::{Reaction, ReactionType, UserId};
use radiohub_core::track::TrackId;
use radiohub_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::domain_decode_error;

/// A row from the `reactions` table.
#[derive(Debug, Clone, FromRow)]
pub struct ReactionRow {
    pub id: DbId,
    pub user_id: String,
    pub track_id: String,
    pub reaction: String,
    pub created_at: Timestamp,
}

impl ReactionRow {
    pub fn into_reaction(self) -> Result<Reaction, sqlx::Error> {
        let user_id = UserId::parse(&self.user_id).map_err(domain_decode_error)?;
        let track_id = TrackId::parse(&self.track_id).map_err(domain_decode_error)?;
        let reaction: ReactionType = self.reaction.parse().map_err(domain_decode_error)?;

        Ok(Reaction {
            user_id,
            track_id,
            reaction,
            created_at: self.created_at,
        })
    }
}
