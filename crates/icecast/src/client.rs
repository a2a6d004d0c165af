//! HTTP client for the Icecast admin endpoints.

use async_trait::async_trait;
use radiohub_core::stream::{ConnectedClient, MountStats, StreamError, StreamSource};

use crate::config::IcecastConfig;
use crate::xml::IceStats;

/// Errors from the Icecast admin layer.
#[derive(Debug, thiserror::Error)]
pub enum IcecastError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Icecast returned a non-2xx status code.
    #[error("Icecast API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The response body was not the expected XML document.
    #[error("invalid Icecast XML: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// The configured mount is not currently served.
    #[error("mount {0} not found")]
    MountNotFound(String),
}

impl From<IcecastError> for StreamError {
    fn from(err: IcecastError) -> Self {
        match err {
            IcecastError::Request(e) => StreamError::Transport(e.to_string()),
            IcecastError::ApiError { status, .. } => StreamError::Status { status },
            IcecastError::Xml(e) => StreamError::Malformed(e.to_string()),
            IcecastError::MountNotFound(mount) => StreamError::MountNotFound(mount),
        }
    }
}

/// Admin client bound to a single Icecast server and mount.
#[derive(Clone)]
pub struct IcecastClient {
    client: reqwest::Client,
    config: IcecastConfig,
}

impl IcecastClient {
    /// Build a client whose requests time out after `config.timeout`.
    pub fn new(config: IcecastConfig) -> Result<Self, IcecastError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Fetch `GET /admin/stats`.
    pub async fn stats(&self) -> Result<IceStats, IcecastError> {
        let response = self
            .client
            .get(format!("{}/admin/stats", self.config.base_url))
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await?;

        Self::parse_xml(response).await
    }

    /// Metadata of the configured mount.
    pub async fn mount_stats(&self) -> Result<MountStats, IcecastError> {
        let stats = self.stats().await?;
        stats
            .source(&self.config.mount)
            .map(MountStats::from)
            .ok_or_else(|| IcecastError::MountNotFound(self.config.mount.clone()))
    }

    /// Fetch `GET /admin/listclients?mount=...` for the configured mount.
    pub async fn list_clients(&self) -> Result<Vec<ConnectedClient>, IcecastError> {
        let response = self
            .client
            .get(format!("{}/admin/listclients", self.config.base_url))
            .query(&[("mount", self.config.mount.as_str())])
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await?;

        let stats: IceStats = Self::parse_xml(response).await?;
        let clients = match stats.source(&self.config.mount) {
            Some(source) => source.clients.iter().map(ConnectedClient::from).collect(),
            None => Vec::new(),
        };

        tracing::trace!(mount = %self.config.mount, count = clients.len(), "Listed Icecast clients");
        Ok(clients)
    }

    // ---- private helpers ----

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, IcecastError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(IcecastError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_xml(response: reqwest::Response) -> Result<IceStats, IcecastError> {
        let body = Self::ensure_success(response).await?.text().await?;
        Ok(IceStats::parse(&body)?)
    }
}

#[async_trait]
impl StreamSource for IcecastClient {
    async fn mount_stats(&self) -> Result<MountStats, StreamError> {
        Ok(IcecastClient::mount_stats(self).await?)
    }

    async fn connected_clients(&self) -> Result<Vec<ConnectedClient>, StreamError> {
        Ok(self.list_clients().await?)
    }
}
