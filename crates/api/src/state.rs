use std::sync::Arc;

use crate::config::ServerConfig;
use crate::mount_cache::MountStatsCache;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: radiohub_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Domain events are published here after their transaction commits.
    pub event_bus: Arc<radiohub_events::EventBus>,
    /// Cached Icecast mount statistics for the radio info endpoints.
    pub mount_stats: MountStatsCache,
}
