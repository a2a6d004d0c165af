//! Client for the Icecast admin interface.
//!
//! Reads `/admin/stats` and `/admin/listclients` with HTTP basic auth and
//! maps the XML documents onto the `radiohub-core` stream types.
//! [`IcecastClient`] implements
//! [`StreamSource`](radiohub_core::stream::StreamSource).

pub mod client;
pub mod config;
pub mod xml;

pub use client::{IcecastClient, IcecastError};
pub use config::IcecastConfig;
