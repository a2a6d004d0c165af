//! Read-through TTL cache in front of the Icecast mount statistics.
//!
//! Radio info is polled by every connected page; the cache keeps that load
//! off Icecast. Concurrent misses share one upstream request.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use radiohub_core::error::CoreError;
use radiohub_core::stream::{MountStats, StreamError, StreamSource};

const KEY: &str = "mount";

#[derive(Clone)]
pub struct MountStatsCache {
    cache: Cache<&'static str, MountStats>,
    source: Arc<dyn StreamSource>,
}

impl MountStatsCache {
    pub fn new(source: Arc<dyn StreamSource>, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        Self { cache, source }
    }

    /// Current mount statistics, at most `ttl` old. Failures are not cached.
    pub async fn get(&self) -> Result<MountStats, CoreError> {
        let source = Arc::clone(&self.source);
        self.cache
            .try_get_with(KEY, async move { source.mount_stats().await })
            .await
            .map_err(|err| match err.as_ref() {
                StreamError::MountNotFound(mount) => CoreError::NotFound {
                    entity: "Mount",
                    id: mount.clone(),
                },
                other => CoreError::Unavailable(other.to_string()),
            })
    }

    pub async fn invalidate(&self) {
        self.cache.invalidate(&KEY).await;
    }
}
