//! Monthly bulk payment-generation job.

use chrono::{Datelike, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::services::PaymentGeneratorService;
use domain::models::BillingPeriod;
use persistence::repositories::DailyTaskLogRepository;

use super::scheduler::{Job, JobFrequency, JobOutcome};
use super::run_guarded;

/// Background job creating the new period's due records.
///
/// Ticks on the daily cadence but only acts on the first of the month;
/// intervals cannot express calendar months directly. Generation is
/// idempotent either way, and the daily reminder job backstops a missed
/// first-of-month tick.
pub struct GenerateMonthlyPaymentsJob {
    guard: DailyTaskLogRepository,
    generator: Arc<PaymentGeneratorService>,
    frequency: JobFrequency,
}

impl GenerateMonthlyPaymentsJob {
    pub fn new(
        pool: PgPool,
        generator: Arc<PaymentGeneratorService>,
        frequency: JobFrequency,
    ) -> Self {
        Self {
            guard: DailyTaskLogRepository::new(pool),
            generator,
            frequency,
        }
    }
}

#[async_trait::async_trait]
impl Job for GenerateMonthlyPaymentsJob {
    fn name(&self) -> &'static str {
        "generate_monthly_payments"
    }

    fn frequency(&self) -> JobFrequency {
        self.frequency
    }

    async fn execute(&self) -> Result<JobOutcome, String> {
        let today = Utc::now().date_naive();
        if today.day() != 1 {
            return Ok(JobOutcome::Skipped {
                reason: "not the first of the month".to_string(),
            });
        }

        run_guarded(&self.guard, self.name(), today, || async {
            let period = BillingPeriod::containing(today);
            let summary = self
                .generator
                .generate_for_period(period)
                .await
                .map_err(|e| format!("Payment generation failed: {}", e))?;

            Ok(format!(
                "period={} created={} existing={}",
                period, summary.created, summary.existing
            ))
        })
        .await
    }
}
