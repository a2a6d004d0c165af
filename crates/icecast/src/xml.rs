//! Serde models for the Icecast admin XML documents.
//!
//! Only the fields radiohub reads are modelled; everything else is ignored.
//! Numeric fields are kept as text and parsed leniently, since Icecast
//! omits or blanks them for idle sources.

use radiohub_core::stream::{ConnectedClient, MountStats};
use serde::Deserialize;

/// Root `<icestats>` element of both admin endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct IceStats {
    #[serde(rename = "source", default)]
    pub sources: Vec<Source>,
}

impl IceStats {
    pub fn parse(xml: &str) -> Result<Self, quick_xml::DeError> {
        quick_xml::de::from_str(xml)
    }

    /// The `<source>` whose `mount` attribute matches exactly.
    pub fn source(&self, mount: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.mount == mount)
    }
}

/// A `<source mount="...">` element.
#[derive(Debug, Default, Deserialize)]
pub struct Source {
    #[serde(rename = "@mount")]
    pub mount: String,
    #[serde(default)]
    pub server_name: Option<String>,
    #[serde(default)]
    pub server_description: Option<String>,
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub bitrate: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub listeners: Option<String>,
    #[serde(default)]
    pub listener_peak: Option<String>,
    #[serde(rename = "listener", default)]
    pub clients: Vec<Listener>,
}

/// A `<listener>` element from `/admin/listclients`.
#[derive(Debug, Default, Deserialize)]
pub struct Listener {
    #[serde(rename = "ID", default)]
    pub id: Option<String>,
    #[serde(rename = "IP", default)]
    pub ip: Option<String>,
    #[serde(rename = "UserAgent", default)]
    pub user_agent: Option<String>,
    #[serde(rename = "Connected", default)]
    pub connected: Option<String>,
}

fn text(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_string()
}

fn number<T: std::str::FromStr + Default>(value: &Option<String>) -> T {
    value
        .as_deref()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_default()
}

impl From<&Source> for MountStats {
    fn from(source: &Source) -> Self {
        MountStats {
            name: text(&source.server_name),
            description: text(&source.server_description),
            stream_url: text(&source.server_url),
            genre: text(&source.genre),
            bitrate: text(&source.bitrate),
            title: text(&source.title),
            listeners: number(&source.listeners),
            listener_peak: number(&source.listener_peak),
        }
    }
}

impl From<&Listener> for ConnectedClient {
    fn from(listener: &Listener) -> Self {
        ConnectedClient {
            id: number(&listener.id),
            ip: text(&listener.ip),
            user_agent: text(&listener.user_agent),
            connected_secs: number(&listener.connected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS: &str = r#"<?xml version="1.0"?>
<icestats>
  <admin>icemaster@localhost</admin>
  <sources>2</sources>
  <source mount="/ogg">
    <listeners>0</listeners>
  </source>
  <source mount="/mp3">
    <bitrate>128</bitrate>
    <genre>Rock</genre>
    <listener_peak>12</listener_peak>
    <listeners>4</listeners>
    <server_description>All day rock</server_description>
    <server_name>Radiohub</server_name>
    <server_url>http://radio.example/mp3</server_url>
    <title>Artist - Song [0123456789abcdef0123456789abcdef]</title>
  </source>
</icestats>"#;

    const CLIENTS: &str = r#"<?xml version="1.0"?>
<icestats>
  <source mount="/mp3">
    <Listeners>2</Listeners>
    <listener>
      <IP> 10.0.0.1 </IP>
      <UserAgent>VLC/3.0.18 LibVLC/3.0.18</UserAgent>
      <Connected>42</Connected>
      <ID>7</ID>
    </listener>
    <listener>
      <IP>10.0.0.2</IP>
      <UserAgent></UserAgent>
      <Connected>3</Connected>
      <ID>9</ID>
    </listener>
  </source>
</icestats>"#;

    #[test]
    fn picks_the_configured_mount() {
        let stats = IceStats::parse(STATS).unwrap();
        assert_eq!(stats.sources.len(), 2);

        let mount = MountStats::from(stats.source("/mp3").unwrap());
        assert_eq!(mount.name, "Radiohub");
        assert_eq!(mount.description, "All day rock");
        assert_eq!(mount.stream_url, "http://radio.example/mp3");
        assert_eq!(mount.listeners, 4);
        assert_eq!(mount.listener_peak, 12);
        assert_eq!(mount.title, "Artist - Song [0123456789abcdef0123456789abcdef]");
    }

    #[test]
    fn idle_source_defaults_missing_fields() {
        let stats = IceStats::parse(STATS).unwrap();
        let mount = MountStats::from(stats.source("/ogg").unwrap());
        assert_eq!(mount.listeners, 0);
        assert_eq!(mount.listener_peak, 0);
        assert!(mount.title.is_empty());
    }

    #[test]
    fn unknown_mount_is_none() {
        let stats = IceStats::parse(STATS).unwrap();
        assert!(stats.source("/aac").is_none());
    }

    #[test]
    fn parses_and_trims_clients() {
        let stats = IceStats::parse(CLIENTS).unwrap();
        let clients: Vec<ConnectedClient> = stats
            .source("/mp3")
            .unwrap()
            .clients
            .iter()
            .map(ConnectedClient::from)
            .collect();

        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].id, 7);
        assert_eq!(clients[0].ip, "10.0.0.1");
        assert_eq!(clients[0].user_agent, "VLC/3.0.18 LibVLC/3.0.18");
        assert_eq!(clients[0].connected_secs, 42);
        assert_eq!(clients[1].user_agent, "");
    }

    #[test]
    fn empty_icestats_has_no_sources() {
        let stats = IceStats::parse("<icestats></icestats>").unwrap();
        assert!(stats.sources.is_empty());
    }
}
