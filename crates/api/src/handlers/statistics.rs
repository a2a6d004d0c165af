use axum::extract::State;
use axum::Json;
use radiohub_core::statistics::StatisticsCategory;
use radiohub_db::repositories::StatisticsRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/radio/statistics
pub async fn get_statistics(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StatisticsCategory>>> {
    let categories = StatisticsRepo::all(&state.pool).await?;
    Ok(Json(categories))
}
