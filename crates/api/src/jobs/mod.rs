//! Background job scheduler and job implementations.

mod generate_payments;
mod lease_expiry;
mod overdue_sweep;
mod reminders;
mod scheduler;

pub use generate_payments::GenerateMonthlyPaymentsJob;
pub use lease_expiry::LeaseExpiryJob;
pub use overdue_sweep::OverdueSweepJob;
pub use reminders::SendRentRemindersJob;
pub use scheduler::{Job, JobFrequency, JobOutcome, JobRegistry, JobScheduler};

use chrono::NaiveDate;
use domain::models::TaskOutcome;
use persistence::repositories::DailyTaskLogRepository;
use std::future::Future;

/// Wrap a job body with the daily-run guard.
///
/// Claims (task_name, today) atomically before any side effect; a lost
/// claim reports `AlreadyRan`. The claim row then records the body's
/// outcome. A body failure after a successful claim leaves the day marked
/// ran-but-failed: at-most-once-per-day, recoverable via the force-rerun
/// path.
pub(crate) async fn run_guarded<F, Fut>(
    guard: &DailyTaskLogRepository,
    task_name: &'static str,
    today: NaiveDate,
    body: F,
) -> Result<JobOutcome, String>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, String>>,
{
    let claim_id = guard
        .try_claim(task_name, today)
        .await
        .map_err(|e| format!("Failed to claim daily run: {}", e))?;

    let Some(claim_id) = claim_id else {
        return Ok(JobOutcome::AlreadyRan);
    };

    match body().await {
        Ok(detail) => {
            guard
                .record_outcome(claim_id, TaskOutcome::Completed, Some(&detail))
                .await
                .map_err(|e| format!("Failed to record outcome: {}", e))?;
            Ok(JobOutcome::Completed { detail })
        }
        Err(err) => {
            // Best effort: the failure itself is what we report.
            if let Err(record_err) = guard
                .record_outcome(claim_id, TaskOutcome::Failed, Some(&err))
                .await
            {
                tracing::error!(
                    task = task_name,
                    error = %record_err,
                    "Failed to record failed outcome"
                );
            }
            Err(err)
        }
    }
}
