use std::{future::Future, time::Duration};

use lissan_config::PollingConfig;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    error::{JobError, Result},
    types::{JobState, JobStatus, RunId, TaskId},
};

/// Bounds on how long a job is polled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::from(&PollingConfig::default())
    }
}

impl From<&PollingConfig> for PollPolicy {
    fn from(config: &PollingConfig) -> Self {
        Self {
            interval: config.interval(),
            max_attempts: config.max_attempts,
            timeout: config.timeout(),
        }
    }
}

/// Query a job's status until it reaches a terminal state
///
/// The first query runs immediately and later ones run every
/// `policy.interval`. Returns the `run_id` of a successful job.
///
/// # Errors
///
/// - [`JobError::Failed`] when the job reports `ERROR`
/// - [`JobError::UpstreamFormat`] when `SUCCESS` carries no `run_id`
/// - [`JobError::Timeout`] when the attempt or wall-time budget runs out
/// - [`JobError::Cancelled`] when `cancel` fires
/// - any error returned by `query`, unchanged
pub async fn poll_until_terminal<F, Fut>(
    task_id: &TaskId,
    policy: &PollPolicy,
    cancel: &CancellationToken,
    mut query: F,
) -> Result<RunId>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<JobState>>,
{
    let deadline = Instant::now() + policy.timeout;
    let mut ticker = tokio::time::interval(policy.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut attempts = 0_u32;
    while attempts < policy.max_attempts {
        within(task_id, attempts, deadline, cancel, ticker.tick()).await?;
        attempts += 1;

        let state = within(task_id, attempts, deadline, cancel, query()).await??;

        match state.status {
            JobStatus::Success => {
                tracing::debug!(%task_id, attempts, "job succeeded");
                return state.run_id.ok_or_else(|| {
                    JobError::UpstreamFormat(format!("job {task_id} succeeded without a run_id"))
                });
            }
            JobStatus::Error => {
                tracing::warn!(%task_id, attempts, "job reported ERROR");
                return Err(JobError::Failed {
                    task_id: task_id.to_string(),
                });
            }
            JobStatus::Pending => {
                tracing::trace!(%task_id, attempts, "job still pending");
            }
        }
    }

    Err(timeout(task_id, attempts))
}

/// Run one step of the poll loop, giving way to cancellation and the deadline
async fn within<T>(
    task_id: &TaskId,
    attempts: u32,
    deadline: Instant,
    cancel: &CancellationToken,
    step: impl Future<Output = T>,
) -> Result<T> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::debug!(%task_id, attempts, "job polling cancelled");
            Err(JobError::Cancelled)
        }
        outcome = tokio::time::timeout_at(deadline, step) => {
            outcome.map_err(|_| timeout(task_id, attempts))
        }
    }
}

fn timeout(task_id: &TaskId, attempts: u32) -> JobError {
    JobError::Timeout {
        task_id: task_id.to_string(),
        attempts,
    }
}
