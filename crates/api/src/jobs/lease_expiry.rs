//! Lease-expiry sweep job.

use chrono::Utc;
use sqlx::PgPool;

use crate::middleware::metrics::record_leases_ended;
use persistence::repositories::{DailyTaskLogRepository, LeaseRepository};

use super::scheduler::{Job, JobFrequency, JobOutcome};
use super::run_guarded;

/// Background job ending active leases whose end date has passed.
pub struct LeaseExpiryJob {
    guard: DailyTaskLogRepository,
    leases: LeaseRepository,
    frequency: JobFrequency,
}

impl LeaseExpiryJob {
    pub fn new(pool: PgPool, frequency: JobFrequency) -> Self {
        Self {
            guard: DailyTaskLogRepository::new(pool.clone()),
            leases: LeaseRepository::new(pool),
            frequency,
        }
    }
}

#[async_trait::async_trait]
impl Job for LeaseExpiryJob {
    fn name(&self) -> &'static str {
        "auto_end_expired_leases"
    }

    fn frequency(&self) -> JobFrequency {
        self.frequency
    }

    async fn execute(&self) -> Result<JobOutcome, String> {
        let today = Utc::now().date_naive();

        run_guarded(&self.guard, self.name(), today, || async {
            let ended = self
                .leases
                .end_expired(today)
                .await
                .map_err(|e| format!("Lease expiry sweep failed: {}", e))?;

            record_leases_ended(ended);
            Ok(format!("ended={}", ended))
        })
        .await
    }
}
