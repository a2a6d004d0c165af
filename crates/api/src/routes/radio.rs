//! Route definitions for `/radio`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{radio, statistics};
use crate::state::AppState;

/// Routes mounted at `/radio`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/info", get(radio::info))
        .route("/listeners", get(radio::listeners))
        .route("/statistics", get(statistics::get_statistics))
}
