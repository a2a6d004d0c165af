pub mod health;
pub mod radio;
pub mod track;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// POST   /tracks                      upsert (encoder callback)
/// GET    /tracks/{id}                 get_by_id
/// POST   /tracks/{id}/like            like (X-User-ID)
/// POST   /tracks/{id}/dislike         dislike (X-User-ID)
/// GET    /tracks/{id}/reaction        check reaction (X-User-ID)
///
/// GET    /radio/info                  mount name, description, listeners
/// GET    /radio/listeners             current and peak listeners
/// GET    /radio/statistics            five ranked track lists
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tracks", track::router())
        .nest("/radio", radio::router())
}
