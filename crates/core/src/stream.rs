//! Boundary to the external streaming server.
//!
//! The listener-tracking cycle only needs two reads from the server: the
//! current mount metadata (for the stream title) and the list of connected
//! clients. [`StreamSource`] is that contract; `radiohub-icecast` implements
//! it over HTTP+XML.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;

use crate::track::TrackId;

/// Stream titles end with the track id in square brackets:
/// `"Artist - Song [0123456789abcdef0123456789abcdef]"`.
const TITLE_TRACK_ID_PATTERN: &str = r"\[([a-f0-9]{32})\]$";

static TITLE_TRACK_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TITLE_TRACK_ID_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Metadata of the monitored mount point.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MountStats {
    pub name: String,
    pub description: String,
    pub stream_url: String,
    pub genre: String,
    pub bitrate: String,
    /// Raw stream title; see [`extract_track_id`].
    pub title: String,
    pub listeners: i64,
    pub listener_peak: i64,
}

/// One client currently connected to the mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedClient {
    /// Session id assigned by the streaming server.
    pub id: u64,
    pub ip: String,
    pub user_agent: String,
    /// Seconds since the client connected.
    pub connected_secs: u64,
}

/// Failure talking to the streaming server.
///
/// Every variant is transient from the core's point of view: a polling
/// cycle that hits one aborts and the next tick tries again.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("stream server unreachable: {0}")]
    Transport(String),

    #[error("stream server returned status {status}")]
    Status { status: u16 },

    #[error("malformed stream server response: {0}")]
    Malformed(String),

    #[error("mount {0} not found on stream server")]
    MountNotFound(String),
}

// ---------------------------------------------------------------------------
// StreamSource
// ---------------------------------------------------------------------------

/// Read-only view of the streaming server.
#[async_trait]
pub trait StreamSource: Send + Sync {
    /// Current metadata of the monitored mount.
    async fn mount_stats(&self) -> Result<MountStats, StreamError>;

    /// Clients connected to the monitored mount right now.
    async fn connected_clients(&self) -> Result<Vec<ConnectedClient>, StreamError>;
}

/// Extract the track id from the bracketed suffix of a stream title.
///
/// Only a lowercase 32-hex suffix anchored at the very end of the title
/// counts. Anything else means no identifiable track.
pub fn extract_track_id(title: &str) -> Option<TrackId> {
    let captures = TITLE_TRACK_ID_RE.captures(title)?;
    TrackId::parse(captures.get(1)?.as_str()).ok()
}
