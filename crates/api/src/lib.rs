//! Radiohub API server library.
//!
//! Exposes config, state, error handling, the mount-stats cache and the
//! router so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod mount_cache;
pub mod router;
pub mod routes;
pub mod state;
