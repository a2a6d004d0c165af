//! Route definitions for the `/tracks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{reaction, track};
use crate::state::AppState;

/// Routes mounted at `/tracks`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(track::upsert))
        .route("/{id}", get(track::get_by_id))
        .route("/{id}/like", post(reaction::like))
        .route("/{id}/dislike", post(reaction::dislike))
        .route("/{id}/reaction", get(reaction::check))
}
