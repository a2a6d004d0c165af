//! Handlers for likes and dislikes on `/tracks/{id}`.
//!
//! The caller identifies itself with the `X-User-ID` header.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use radiohub_core::error::CoreError;
use radiohub_core::events::EventPublisher;
use radiohub_core::reaction::{Reaction, ReactionStatus, ReactionType, UserId};
use radiohub_core::track::TrackId;
use radiohub_db::repositories::{ReactionInsert, ReactionRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

fn user_id_header(headers: &HeaderMap) -> AppResult<&str> {
    headers
        .get(USER_ID_HEADER)
        .ok_or_else(|| AppError::BadRequest("Missing X-User-ID header".into()))?
        .to_str()
        .map_err(|_| AppError::BadRequest("X-User-ID header must be visible ASCII".into()))
}

/// POST /api/v1/tracks/{id}/like
pub async fn like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> AppResult<StatusCode> {
    add(&state, &id, &headers, ReactionType::Like).await
}

/// POST /api/v1/tracks/{id}/dislike
pub async fn dislike(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> AppResult<StatusCode> {
    add(&state, &id, &headers, ReactionType::Dislike).await
}

/// GET /api/v1/tracks/{id}/reaction
pub async fn check(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> AppResult<Json<ReactionStatus>> {
    let user_id = UserId::parse(user_id_header(&headers)?)?;
    let track_id = TrackId::parse(&id)?;
    let reaction = ReactionRepo::find_type(&state.pool, &user_id, &track_id).await?;
    Ok(Json(ReactionStatus::from(reaction)))
}

async fn add(
    state: &AppState,
    track_id: &str,
    headers: &HeaderMap,
    kind: ReactionType,
) -> AppResult<StatusCode> {
    let reaction = Reaction::from_input(user_id_header(headers)?, track_id, kind)?;

    match ReactionRepo::add(&state.pool, &reaction).await? {
        ReactionInsert::Inserted(mut track) => {
            state.event_bus.publish_all(track.take_events());
            Ok(StatusCode::NO_CONTENT)
        }
        ReactionInsert::AlreadyReacted => Err(CoreError::Conflict(format!(
            "User has already reacted to track {}",
            reaction.track_id
        ))
        .into()),
        ReactionInsert::TrackMissing => Err(CoreError::NotFound {
            entity: "Track",
            id: reaction.track_id.to_string(),
        }
        .into()),
    }
}
