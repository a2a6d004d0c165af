//! Radiohub domain event fan-out.
//!
//! - [`EventBus`] is the in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`. It implements
//!   [`EventPublisher`](radiohub_core::events::EventPublisher).
//! - [`EventLogger`] is a background subscriber that writes every event to
//!   the structured log.

pub mod bus;
pub mod logger;

pub use bus::EventBus;
pub use logger::EventLogger;
