//! Handlers for the `/tracks` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use radiohub_core::error::CoreError;
use radiohub_core::events::EventPublisher;
use radiohub_core::track::{Cover, Title, TrackId, TrackState};
use radiohub_db::repositories::TrackRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::state::AppState;

/// Body posted by the stream encoder each time a track starts playing.
#[derive(Debug, Deserialize)]
pub struct UpsertTrackRequest {
    #[serde(rename = "Md5")]
    pub md5: String,
    #[serde(rename = "StreamTitle")]
    pub stream_title: String,
    #[serde(rename = "StreamUrl", default)]
    pub stream_url: String,
}

#[derive(Debug, Serialize)]
pub struct UpsertTrackResponse {
    pub rotate: i64,
}

/// POST /api/v1/tracks
pub async fn upsert(
    State(state): State<AppState>,
    Json(input): Json<UpsertTrackRequest>,
) -> AppResult<(StatusCode, Json<UpsertTrackResponse>)> {
    let id = TrackId::parse(&input.md5)?;
    let title = Title::parse(&input.stream_title)?;
    let cover = Cover::new(&input.stream_url);

    let mut track = TrackRepo::upsert(&state.pool, id, title, cover).await?;
    state.event_bus.publish_all(track.take_events());

    tracing::debug!(track_id = %track.id(), rotate = track.rotate(), "Track upserted");
    Ok((
        StatusCode::CREATED,
        Json(UpsertTrackResponse {
            rotate: track.rotate(),
        }),
    ))
}

/// GET /api/v1/tracks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TrackState>> {
    let id = TrackId::parse(&id)?;
    let track = TrackRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Track",
            id: id.to_string(),
        })?;
    Ok(Json(track.state()))
}
