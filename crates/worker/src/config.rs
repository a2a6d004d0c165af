use std::time::Duration;

/// Listener-tracking scheduler settings.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Whether the scheduler runs at all (default: `false`).
    pub enabled: bool,
    /// Tick period (default: 3 seconds).
    pub interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: Duration::from_secs(3),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default |
    /// |-------------------------|---------|
    /// | `SCHEDULER_ENABLED`     | `false` |
    /// | `TRACKER_INTERVAL_SECS` | `3`     |
    pub fn from_env() -> Self {
        let enabled = std::env::var("SCHEDULER_ENABLED")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let interval_secs: u64 = std::env::var("TRACKER_INTERVAL_SECS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("TRACKER_INTERVAL_SECS must be a valid u64");
        assert!(interval_secs > 0, "TRACKER_INTERVAL_SECS must be positive");

        Self {
            enabled,
            interval: Duration::from_secs(interval_secs),
        }
    }
}
