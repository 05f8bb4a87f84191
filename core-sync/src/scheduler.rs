//! Fixed-delay cycle loop
//!
//! Runs the first cycle immediately, then sleeps `poll_interval` after each
//! cycle completes. The period therefore stretches with cycle duration; no
//! drift compensation is applied.

use core_runtime::FailurePolicy;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::cycle::CycleRunner;
use crate::error::Result;

/// Drives a [`CycleRunner`] until cancelled or, under
/// [`FailurePolicy::Propagate`], until a cycle fails
pub struct SyncScheduler {
    runner: Arc<dyn CycleRunner>,
    poll_interval: Duration,
    failure_policy: FailurePolicy,
}

impl SyncScheduler {
    pub fn new(
        runner: Arc<dyn CycleRunner>,
        poll_interval: Duration,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            runner,
            poll_interval,
            failure_policy,
        }
    }

    /// Run cycles sequentially.
    ///
    /// Cancellation is observed before a cycle starts and while sleeping; a
    /// cycle already in flight runs to completion.
    ///
    /// # Errors
    ///
    /// Returns the first cycle error when the policy is
    /// [`FailurePolicy::Propagate`].
    #[instrument(skip(self, cancel), fields(interval_secs = self.poll_interval.as_secs()))]
    pub async fn run(&self, cancel: CancellationToken) -> Result<()> {
        let mut cycle = 0u64;

        loop {
            if cancel.is_cancelled() {
                info!("Scheduler cancelled before cycle {}", cycle + 1);
                return Ok(());
            }

            cycle += 1;
            match self.runner.run_cycle().await {
                Ok(report) => {
                    info!(
                        cycle,
                        items = report.items_listed,
                        updated_cells = report.updated_cells,
                        "Cycle completed"
                    );
                }
                Err(e) => match self.failure_policy {
                    FailurePolicy::Propagate => {
                        error!(cycle, error = %e, "Cycle failed, stopping");
                        return Err(e);
                    }
                    FailurePolicy::LogAndContinue => {
                        error!(cycle, error = %e, "Cycle failed, will retry next interval");
                    }
                },
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Scheduler cancelled while waiting");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }
}
