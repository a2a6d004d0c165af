//! Reactions: one like or dislike per (user, track), forever.
//!
//! The uniqueness rule is enforced by the storage layer (a unique
//! constraint checked by the insert itself). This module only provides the
//! validated value types.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::Serialize;

use crate::error::CoreError;
use crate::track::TrackId;
use crate::types::Timestamp;

/// Identity of a reacting or listening user.
///
/// Either caller-supplied (HTTP reactions) or an anonymized digest
/// (listener tracking); both share one identity space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("user id cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wrap a value already known to be a non-empty digest.
    pub(crate) fn from_digest(digest: String) -> Self {
        debug_assert!(!digest.is_empty());
        Self(digest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The only two reactions a user can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Like,
    Dislike,
}

impl ReactionType {
    /// Storage / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ReactionType::Like => "like",
            ReactionType::Dislike => "dislike",
        }
    }
}

impl FromStr for ReactionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(ReactionType::Like),
            "dislike" => Ok(ReactionType::Dislike),
            other => Err(CoreError::Validation(format!(
                "reaction must be 'like' or 'dislike', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's reaction to a track. Never mutated or deleted once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub user_id: UserId,
    pub track_id: TrackId,
    pub reaction: ReactionType,
    pub created_at: Timestamp,
}

impl Reaction {
    pub fn new(user_id: UserId, track_id: TrackId, reaction: ReactionType) -> Self {
        Self {
            user_id,
            track_id,
            reaction,
            created_at: Utc::now(),
        }
    }

    /// Validate raw caller input into a reaction.
    pub fn from_input(
        user_id: &str,
        track_id: &str,
        reaction: ReactionType,
    ) -> Result<Self, CoreError> {
        Ok(Self::new(
            UserId::parse(user_id)?,
            TrackId::parse(track_id)?,
            reaction,
        ))
    }
}

/// Answer to "has this user reacted to this track?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReactionStatus {
    pub has_reacted: bool,
    pub reaction: Option<ReactionType>,
}

impl From<Option<ReactionType>> for ReactionStatus {
    fn from(reaction: Option<ReactionType>) -> Self {
        Self {
            has_reacted: reaction.is_some(),
            reaction,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const TRACK: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn user_id_is_trimmed_and_required() {
        assert_eq!(UserId::parse(" abc ").unwrap().as_str(), "abc");
        assert_matches!(UserId::parse(""), Err(CoreError::Validation(_)));
        assert_matches!(UserId::parse("  \t"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn reaction_type_round_trips_through_str() {
        for reaction in [ReactionType::Like, ReactionType::Dislike] {
            assert_eq!(reaction.as_str().parse::<ReactionType>().unwrap(), reaction);
        }
    }

    #[test]
    fn reaction_type_rejects_anything_else() {
        assert_matches!("love".parse::<ReactionType>(), Err(CoreError::Validation(_)));
        assert_matches!("Like".parse::<ReactionType>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn from_input_validates_user_and_track() {
        let reaction = Reaction::from_input(" u1 ", TRACK, ReactionType::Like).unwrap();
        assert_eq!(reaction.user_id.as_str(), "u1");
        assert_eq!(reaction.track_id.as_str(), TRACK);
        assert_matches!(
            Reaction::from_input("", TRACK, ReactionType::Like),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            Reaction::from_input("u1", "short", ReactionType::Dislike),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn status_reports_absence_without_error() {
        let status = ReactionStatus::from(None);
        assert!(!status.has_reacted);
        assert!(status.reaction.is_none());

        let status = ReactionStatus::from(Some(ReactionType::Dislike));
        assert!(status.has_reacted);
        assert_eq!(status.reaction, Some(ReactionType::Dislike));
    }
}
