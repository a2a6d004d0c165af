//! Ranked statistics views over the track store.
//!
//! The store produces five lists of [`TrackStats`]; this module names them
//! and fixes their size. Ties inside a ranking follow the storage's natural
//! order and callers must not depend on it.

use serde::Serialize;

/// Entries per ranked list.
pub const TOP_N: i64 = 5;

/// Flattened snapshot of a track. No identifiers are exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackStats {
    pub title: String,
    pub cover: String,
    pub rotate: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub listeners: i64,
}

/// The five rankings, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// Most recently created.
    History,
    /// Current unique listeners, `listeners > 0` only.
    Listeners,
    /// Rotation count.
    Rotations,
    /// Likes, `likes > 0` only.
    Likes,
    /// Dislikes, `dislikes > 0` only.
    Dislikes,
}

impl Ranking {
    pub const ALL: [Ranking; 5] = [
        Ranking::History,
        Ranking::Listeners,
        Ranking::Rotations,
        Ranking::Likes,
        Ranking::Dislikes,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Ranking::History => "history",
            Ranking::Listeners => "listen",
            Ranking::Rotations => "rotate",
            Ranking::Likes => "likes",
            Ranking::Dislikes => "dislikes",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Ranking::History => "Last played tracks",
            Ranking::Listeners => "Most listened tracks",
            Ranking::Rotations => "Most rotated tracks",
            Ranking::Likes => "Most liked tracks",
            Ranking::Dislikes => "Most disliked tracks",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Ranking::History => "HistoryIcon",
            Ranking::Listeners => "ListenIcon",
            Ranking::Rotations => "RotateIcon",
            Ranking::Likes => "LikeIcon",
            Ranking::Dislikes => "DislikeIcon",
        }
    }

    /// Whether an entry may appear in this ranking at all.
    pub fn admits(self, stats: &TrackStats) -> bool {
        match self {
            Ranking::History | Ranking::Rotations => true,
            Ranking::Listeners => stats.listeners > 0,
            Ranking::Likes => stats.likes > 0,
            Ranking::Dislikes => stats.dislikes > 0,
        }
    }
}

/// One ranked list as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsCategory {
    pub key: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub tracks: Vec<TrackStats>,
}

impl StatisticsCategory {
    /// Build a category, dropping anything the ranking does not admit and
    /// capping at [`TOP_N`].
    pub fn new(ranking: Ranking, tracks: Vec<TrackStats>) -> Self {
        let tracks = tracks
            .into_iter()
            .filter(|t| ranking.admits(t))
            .take(TOP_N as usize)
            .collect();
        Self {
            key: ranking.key(),
            description: ranking.description(),
            icon: ranking.icon(),
            tracks,
        }
    }
}
