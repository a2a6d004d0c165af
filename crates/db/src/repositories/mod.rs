//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Every track mutation runs in a
//! single transaction holding the track row lock.

pub mod listener_repo;
pub mod reaction_repo;
pub mod statistics_repo;
pub mod track_repo;

pub use listener_repo::ListenerRepo;
pub use reaction_repo::{ReactionInsert, ReactionRepo};
pub use statistics_repo::StatisticsRepo;
pub use track_repo::TrackRepo;
