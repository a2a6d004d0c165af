//! Handlers for live radio information from Icecast.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ListenerResponse {
    pub current: i64,
    pub peak: i64,
}

#[derive(Debug, Serialize)]
pub struct RadioResponse {
    pub name: String,
    pub description: String,
    #[serde(rename = "streamUrl")]
    pub stream_url: String,
    pub listener: ListenerResponse,
}

/// GET /api/v1/radio/info
pub async fn info(State(state): State<AppState>) -> AppResult<Json<RadioResponse>> {
    let stats = state.mount_stats.get().await?;
    Ok(Json(RadioResponse {
        name: stats.name,
        description: stats.description,
        stream_url: stats.stream_url,
        listener: ListenerResponse {
            current: stats.listeners,
            peak: stats.listener_peak,
        },
    }))
}

/// GET /api/v1/radio/listeners
pub async fn listeners(State(state): State<AppState>) -> AppResult<Json<ListenerResponse>> {
    let stats = state.mount_stats.get().await?;
    Ok(Json(ListenerResponse {
        current: stats.listeners,
        peak: stats.listener_peak,
    }))
}
