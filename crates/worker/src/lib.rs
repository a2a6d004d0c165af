//! Background work for radiohub.
//!
//! - [`Scheduler`] runs a [`Job`] on a fixed interval with a single-flight
//!   guard and a cooperative, deadline-bounded [`Scheduler::stop`].
//! - [`ListenerTrackingJob`] is the polling cycle that records listener
//!   sightings for the track currently on air.

pub mod config;
pub mod job;
pub mod listener_tracking;
pub mod scheduler;

pub use config::TrackerConfig;
pub use job::Job;
pub use listener_tracking::{CycleOutcome, ListenerTrackingJob, TrackingError};
pub use scheduler::{Scheduler, SchedulerError};
