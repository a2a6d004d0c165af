//! The listener-tracking polling cycle.
//!
//! One cycle, strictly in order:
//!
//! 1. read the mount's stream title and extract the track id
//! 2. confirm the track exists
//! 3. list connected clients and record one anonymized sighting each
//! 4. recount distinct listeners and store the count on the track
//!
//! Steps 1 and 2 end the cycle quietly when there is nothing to track. A
//! failed sighting write is logged and skipped; any other failure aborts the
//! cycle and the next tick retries.

use std::sync::Arc;

use async_trait::async_trait;
use radiohub_core::events::EventPublisher;
use radiohub_core::listener::anonymize_listener;
use radiohub_core::stream::{extract_track_id, StreamError, StreamSource};
use radiohub_core::track::TrackId;
use radiohub_db::repositories::{ListenerRepo, TrackRepo};
use radiohub_db::DbPool;

use crate::job::Job;

/// Why a cycle ended the way it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The stream title carries no track id.
    NoTrackInTitle,
    /// The title names a track that is not stored. Nothing was written.
    UnknownTrack(TrackId),
    /// Sightings recorded and the listener count refreshed.
    Updated {
        track_id: TrackId,
        listeners: i64,
        new_sightings: usize,
        failed_sightings: usize,
    },
}

/// A cycle that had to be abandoned.
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("stream server unavailable: {0}")]
    Unavailable(#[from] StreamError),

    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Polls the stream server and keeps per-track unique listener counts.
pub struct ListenerTrackingJob {
    pool: DbPool,
    source: Arc<dyn StreamSource>,
    events: Arc<dyn EventPublisher>,
}

impl ListenerTrackingJob {
    pub fn new(
        pool: DbPool,
        source: Arc<dyn StreamSource>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            pool,
            source,
            events,
        }
    }

    /// Run one polling cycle.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, TrackingError> {
        let stats = self.source.mount_stats().await?;

        let Some(track_id) = extract_track_id(&stats.title) else {
            tracing::debug!(title = %stats.title, "No track id in stream title");
            return Ok(CycleOutcome::NoTrackInTitle);
        };

        if !TrackRepo::exists(&self.pool, &track_id).await? {
            tracing::debug!(track_id = %track_id, "Track on air is not known, skipping");
            return Ok(CycleOutcome::UnknownTrack(track_id));
        }

        let clients = self.source.connected_clients().await?;

        let mut new_sightings = 0;
        let mut failed_sightings = 0;
        for client in &clients {
            let user_id = anonymize_listener(&client.ip, &client.user_agent, client.id);
            match ListenerRepo::record_sighting(&self.pool, &user_id, &track_id).await {
                Ok(true) => new_sightings += 1,
                Ok(false) => {}
                Err(e) => {
                    failed_sightings += 1;
                    tracing::warn!(
                        track_id = %track_id,
                        client_id = client.id,
                        error = %e,
                        "Failed to record listener sighting"
                    );
                }
            }
        }

        let listeners = ListenerRepo::unique_count(&self.pool, &track_id).await?;

        let Some(mut track) =
            TrackRepo::update_listener_count(&self.pool, &track_id, listeners).await?
        else {
            return Ok(CycleOutcome::UnknownTrack(track_id));
        };
        self.events.publish_all(track.take_events());

        Ok(CycleOutcome::Updated {
            track_id,
            listeners,
            new_sightings,
            failed_sightings,
        })
    }
}

#[async_trait]
impl Job for ListenerTrackingJob {
    type Output = CycleOutcome;
    type Error = TrackingError;

    fn name(&self) -> &'static str {
        "listener_tracking"
    }

    async fn execute(&self) -> Result<CycleOutcome, TrackingError> {
        self.run_cycle().await
    }
}
