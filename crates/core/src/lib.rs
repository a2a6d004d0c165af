//! radiohub domain layer.
//!
//! Zero internal dependencies: value types, the Track aggregate, reactions,
//! listener anonymization, statistics definitions, and the two outbound
//! seams ([`stream::StreamSource`], [`events::EventPublisher`]) the rest of
//! the workspace plugs into.

pub mod error;
pub mod events;
pub mod hashing;
pub mod listener;
pub mod reaction;
pub mod statistics;
pub mod stream;
pub mod track;
pub mod types;
