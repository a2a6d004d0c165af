use std::time::Duration;

/// Connection settings for the Icecast admin interface.
#[derive(Debug, Clone)]
pub struct IcecastConfig {
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Mount point to monitor, e.g. `/mp3`.
    pub mount: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl IcecastConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `ICECAST_URL`          | `http://127.0.0.1:8000` |
    /// | `ICECAST_USER`         | `admin`                 |
    /// | `ICECAST_PASSWORD`     | `changeme`              |
    /// | `ICECAST_MOUNT`        | `/mp3`                  |
    /// | `ICECAST_TIMEOUT_SECS` | `5`                     |
    pub fn from_env() -> Self {
        let base_url = std::env::var("ICECAST_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".into())
            .trim_end_matches('/')
            .to_string();

        let username = std::env::var("ICECAST_USER").unwrap_or_else(|_| "admin".into());
        let password = std::env::var("ICECAST_PASSWORD").unwrap_or_else(|_| "changeme".into());
        let mount = std::env::var("ICECAST_MOUNT").unwrap_or_else(|_| "/mp3".into());

        let timeout_secs: u64 = std::env::var("ICECAST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("ICECAST_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            username,
            password,
            mount,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
