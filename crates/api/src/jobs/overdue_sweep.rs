//! Overdue-payment sweep job.

use chrono::Utc;
use sqlx::PgPool;

use crate::middleware::metrics::record_payments_marked_late;
use persistence::repositories::{DailyTaskLogRepository, PaymentRepository};

use super::scheduler::{Job, JobFrequency, JobOutcome};
use super::run_guarded;

/// Background job transitioning past-due PENDING payments to LATE.
pub struct OverdueSweepJob {
    guard: DailyTaskLogRepository,
    payments: PaymentRepository,
    frequency: JobFrequency,
}

impl OverdueSweepJob {
    pub fn new(pool: PgPool, frequency: JobFrequency) -> Self {
        Self {
            guard: DailyTaskLogRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool),
            frequency,
        }
    }
}

#[async_trait::async_trait]
impl Job for OverdueSweepJob {
    fn name(&self) -> &'static str {
        "update_overdue_payments"
    }

    fn frequency(&self) -> JobFrequency {
        self.frequency
    }

    async fn execute(&self) -> Result<JobOutcome, String> {
        let today = Utc::now().date_naive();

        run_guarded(&self.guard, self.name(), today, || async {
            let marked = self
                .payments
                .mark_overdue(today)
                .await
                .map_err(|e| format!("Overdue sweep failed: {}", e))?;

            record_payments_marked_late(marked);
            Ok(format!("marked_late={}", marked))
        })
        .await
    }
}
