//! Single-flight periodic runner.
//!
//! Each tick starts a cycle only if none is in flight; otherwise the tick is
//! dropped, never queued. [`Scheduler::stop`] halts ticking and waits for the
//! in-flight cycle, bounded by a deadline. Cycles are never aborted.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::job::Job;

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// An in-flight cycle was still running when the stop deadline elapsed.
    /// The cycle keeps running to completion in the background.
    #[error("in-flight cycle did not finish within {0:?}")]
    StopTimeout(Duration),
}

/// Shared between the tick loop and the cycles it spawns.
struct Flight {
    running: AtomicBool,
    started: AtomicU64,
    skipped: AtomicU64,
}

/// Clears the single-flight flag when a cycle ends, including by panic.
struct FlightGuard(Arc<Flight>);

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.0.running.store(false, Ordering::Release);
    }
}

/// Handle to a running periodic job.
pub struct Scheduler {
    cancel: CancellationToken,
    tracker: TaskTracker,
    flight: Arc<Flight>,
}

impl Scheduler {
    /// Start ticking `job` every `period`. The first tick fires immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<J: Job>(job: Arc<J>, period: Duration) -> Self {
        let cancel = CancellationToken::new();
        let tracker = TaskTracker::new();
        let flight = Arc::new(Flight {
            running: AtomicBool::new(false),
            started: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
        });

        tracing::info!(
            job = job.name(),
            interval_ms = period.as_millis() as u64,
            "Scheduler started"
        );

        tracker.spawn(Self::tick_loop(
            job,
            period,
            cancel.clone(),
            tracker.clone(),
            Arc::clone(&flight),
        ));

        Self {
            cancel,
            tracker,
            flight,
        }
    }

    /// Whether a cycle is in flight right now.
    pub fn is_running_cycle(&self) -> bool {
        self.flight.running.load(Ordering::Acquire)
    }

    /// Cycles started so far.
    pub fn cycles_started(&self) -> u64 {
        self.flight.started.load(Ordering::Relaxed)
    }

    /// Ticks dropped because a cycle was still in flight.
    pub fn ticks_skipped(&self) -> u64 {
        self.flight.skipped.load(Ordering::Relaxed)
    }

    /// Stop ticking and wait for the in-flight cycle, if any.
    ///
    /// No new cycle starts once this is called. Returns
    /// [`SchedulerError::StopTimeout`] if the cycle is still running when
    /// `deadline` elapses.
    pub async fn stop(&self, deadline: Duration) -> Result<(), SchedulerError> {
        self.cancel.cancel();
        self.tracker.close();

        match tokio::time::timeout(deadline, self.tracker.wait()).await {
            Ok(()) => {
                tracing::info!("Scheduler stopped");
                Ok(())
            }
            Err(_) => Err(SchedulerError::StopTimeout(deadline)),
        }
    }

    async fn tick_loop<J: Job>(
        job: Arc<J>,
        period: Duration,
        cancel: CancellationToken,
        tracker: TaskTracker,
        flight: Arc<Flight>,
    ) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    if flight
                        .running
                        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                        .is_err()
                    {
                        flight.skipped.fetch_add(1, Ordering::Relaxed);
                        tracing::debug!(job = job.name(), "Previous cycle still running, tick skipped");
                        continue;
                    }

                    flight.started.fetch_add(1, Ordering::Relaxed);
                    let guard = FlightGuard(Arc::clone(&flight));
                    tracker.spawn(Self::run_cycle(Arc::clone(&job), guard));
                }
            }
        }

        tracing::debug!(job = job.name(), "Scheduler tick loop exited");
    }

    async fn run_cycle<J: Job>(job: Arc<J>, _guard: FlightGuard) {
        let started = Instant::now();
        match job.execute().await {
            Ok(outcome) => {
                tracing::debug!(
                    job = job.name(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    ?outcome,
                    "Cycle finished"
                );
            }
            Err(e) => {
                tracing::error!(
                    job = job.name(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "Cycle failed"
                );
            }
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;

    /// Sleeps for `work` per cycle and records concurrency.
    struct SlowJob {
        work: Duration,
        fail: bool,
        started: AtomicUsize,
        finished: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl SlowJob {
        fn new(work: Duration) -> Arc<Self> {
            Arc::new(Self {
                work,
                fail: false,
                started: AtomicUsize::new(0),
                finished: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            })
        }

        fn failing(work: Duration) -> Arc<Self> {
            let mut job = Self::new(work);
            Arc::get_mut(&mut job).unwrap().fail = true;
            job
        }
    }

    #[async_trait]
    impl Job for SlowJob {
        type Output = ();
        type Error = String;

        fn name(&self) -> &'static str {
            "slow"
        }

        async fn execute(&self) -> Result<(), String> {
            self.started.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(self.work).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.finished.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err("boom".into())
            } else {
                Ok(())
            }
        }
    }

    const PERIOD: Duration = Duration::from_secs(3);

    #[tokio::test(start_paused = true)]
    async fn overlapping_ticks_are_skipped_not_queued() {
        // Cycles take 7s on a 3s period: ticks at 3s and 6s are dropped,
        // the tick at 9s starts the second cycle.
        let job = SlowJob::new(Duration::from_secs(7));
        let scheduler = Scheduler::start(Arc::clone(&job), PERIOD);

        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(job.started.load(Ordering::SeqCst), 2);
        assert_eq!(job.max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.cycles_started(), 2);
        assert_eq!(scheduler.ticks_skipped(), 2);
        assert!(scheduler.is_running_cycle());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_waits_for_in_flight_cycle() {
        let job = SlowJob::new(Duration::from_secs(5));
        let scheduler = Scheduler::start(Arc::clone(&job), PERIOD);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(scheduler.is_running_cycle());

        scheduler.stop(Duration::from_secs(10)).await.unwrap();
        assert_eq!(job.finished.load(Ordering::SeqCst), 1);
        assert!(!scheduler.is_running_cycle());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_reports_deadline_without_aborting_cycle() {
        let job = SlowJob::new(Duration::from_secs(60));
        let scheduler = Scheduler::start(Arc::clone(&job), PERIOD);

        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_matches!(
            scheduler.stop(Duration::from_secs(2)).await,
            Err(SchedulerError::StopTimeout(d)) if d == Duration::from_secs(2)
        );
        assert_eq!(job.finished.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(job.finished.load(Ordering::SeqCst), 1);
        assert_eq!(job.started.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn no_cycles_start_after_stop() {
        let job = SlowJob::new(Duration::from_millis(100));
        let scheduler = Scheduler::start(Arc::clone(&job), PERIOD);

        tokio::time::sleep(Duration::from_secs(1)).await;
        scheduler.stop(Duration::from_secs(1)).await.unwrap();
        let started = job.started.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(job.started.load(Ordering::SeqCst), started);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_cycles_do_not_stop_ticking() {
        let job = SlowJob::failing(Duration::from_millis(100));
        let scheduler = Scheduler::start(Arc::clone(&job), PERIOD);

        tokio::time::sleep(Duration::from_secs(7)).await;

        // Ticks at 0s, 3s and 6s.
        assert_eq!(job.started.load(Ordering::SeqCst), 3);
        assert_eq!(scheduler.ticks_skipped(), 0);
        scheduler.stop(Duration::from_secs(1)).await.unwrap();
    }
}
