use std::fmt;

use async_trait::async_trait;

/// One unit of periodic work driven by the [`Scheduler`](crate::Scheduler).
///
/// A failed cycle is logged by the scheduler and the next tick runs again;
/// errors never stop the scheduler.
#[async_trait]
pub trait Job: Send + Sync + 'static {
    type Output: fmt::Debug + Send;
    type Error: fmt::Display + Send;

    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    /// Run one cycle to completion.
    async fn execute(&self) -> Result<Self::Output, Self::Error>;
}
