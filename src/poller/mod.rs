//! Job Status Poller
//!
//! Drives a bounded polling loop against a generation job until it reaches a
//! terminal state or the attempt ceiling is exceeded. The decision logic is
//! an explicit state machine — a pure function from (reported status,
//! attempts made) to the next action — so the ceiling and terminal handling
//! are testable without timers. The async driver around it is a thin shell
//! that sleeps, re-invokes the status check, and honors cancellation.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::defaults;
use crate::error::AiError;
use crate::types::GenerationStatus;

/// Polling cadence and ceiling
#[derive(Debug, Clone)]
pub struct PollPlan {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPlan {
    fn default() -> Self {
        Self {
            interval: defaults::polling::INTERVAL,
            max_attempts: defaults::polling::MAX_ATTEMPTS,
        }
    }
}

/// Next action after a status check
#[derive(Debug, Clone, PartialEq)]
pub enum PollStep {
    /// Job still running and attempts remain
    Continue,
    /// Job reached a terminal state
    Done(GenerationStatus),
    /// Attempt ceiling reached without a terminal state
    TimedOut,
}

/// Outcome of a driven polling loop
#[derive(Debug, Clone, PartialEq)]
pub enum PollResult {
    /// The job reached SUCCEEDED or FAILED
    Completed(GenerationStatus),
    /// The owning context requested cancellation
    Cancelled,
}

/// Decide the next action after `attempts_made` status checks.
///
/// Terminal states win over the ceiling: a final status observed on the last
/// attempt is still a completion, and nothing transitions out of it.
pub fn evaluate(status: GenerationStatus, attempts_made: u32, plan: &PollPlan) -> PollStep {
    if status.status.is_terminal() {
        return PollStep::Done(status);
    }
    if attempts_made >= plan.max_attempts {
        return PollStep::TimedOut;
    }
    PollStep::Continue
}

/// Poll `check` on the plan's interval until the job completes.
///
/// Ceiling expiry surfaces as a timeout error, distinct from a
/// vendor-reported FAILED state (which is a successful poll outcome carrying
/// that status). Cancellation stops the loop between checks without leaving
/// an orphaned timer.
pub async fn poll_until_terminal<F, Fut>(
    mut check: F,
    plan: PollPlan,
    cancel: CancellationToken,
) -> Result<PollResult, AiError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<GenerationStatus, AiError>>,
{
    let mut attempts = 0u32;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(PollResult::Cancelled),
            _ = tokio::time::sleep(plan.interval) => {}
        }

        let status = check().await?;
        attempts += 1;
        debug!(attempts, status = %status.status, "polled generation job");

        match evaluate(status, attempts, &plan) {
            PollStep::Done(status) => return Ok(PollResult::Completed(status)),
            PollStep::TimedOut => {
                return Err(AiError::TimeoutError(
                    "Timed out waiting for model generation to finish".to_string(),
                ));
            }
            PollStep::Continue => {}
        }
    }
}
