//! Daily rent-reminder job.
//!
//! Runs the full pipeline for the current date: ensure the period's
//! payments exist, evaluate which reminders are owed, dispatch them.

use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use crate::services::{PaymentGeneratorService, ReminderService};
use domain::models::BillingPeriod;
use persistence::repositories::DailyTaskLogRepository;

use super::scheduler::{Job, JobFrequency, JobOutcome};
use super::run_guarded;

/// Background job evaluating and dispatching rent reminders.
pub struct SendRentRemindersJob {
    guard: DailyTaskLogRepository,
    generator: Arc<PaymentGeneratorService>,
    reminders: Arc<ReminderService>,
    frequency: JobFrequency,
}

impl SendRentRemindersJob {
    pub fn new(
        pool: PgPool,
        generator: Arc<PaymentGeneratorService>,
        reminders: Arc<ReminderService>,
        frequency: JobFrequency,
    ) -> Self {
        Self {
            guard: DailyTaskLogRepository::new(pool),
            generator,
            reminders,
            frequency,
        }
    }
}

#[async_trait::async_trait]
impl Job for SendRentRemindersJob {
    fn name(&self) -> &'static str {
        "send_rent_reminders"
    }

    fn frequency(&self) -> JobFrequency {
        self.frequency
    }

    async fn execute(&self) -> Result<JobOutcome, String> {
        let now = Utc::now();
        let today = now.date_naive();

        run_guarded(&self.guard, self.name(), today, || async {
            // Backstop for a missed first-of-month run: generation is
            // idempotent, so this creates rows only if the monthly pass
            // hasn't.
            let period = BillingPeriod::containing(today);
            let generation = self
                .generator
                .generate_for_period(period)
                .await
                .map_err(|e| format!("Payment generation failed: {}", e))?;

            // Candidates are fetched before any send; channel calls happen
            // outside any open transaction.
            let candidates = self
                .reminders
                .find_due(today)
                .await
                .map_err(|e| format!("Reminder evaluation failed: {}", e))?;

            let mut sent = 0usize;
            let mut failed = 0usize;
            for candidate in &candidates {
                let outcome = self
                    .reminders
                    .dispatch(candidate, now)
                    .await
                    .map_err(|e| format!("Reminder dispatch failed: {}", e))?;
                sent += outcome.sent.len();
                failed += outcome.failed.len();
            }

            info!(
                candidates = candidates.len(),
                sent, failed, "Reminder pass complete"
            );

            Ok(format!(
                "generated={} candidates={} sent={} failed={}",
                generation.created,
                candidates.len(),
                sent,
                failed
            ))
        })
        .await
    }
}
