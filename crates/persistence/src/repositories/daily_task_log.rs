//! Daily task log repository: the once-per-day run guard.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::DailyTaskLogEntity;
use domain::models::TaskOutcome;

const TASK_LOG_COLUMNS: &str =
    "id, task_name, run_date, started_at, completed_at, outcome, detail";

/// Repository for the daily task log.
///
/// `try_claim` is the atomic check-and-set gating scheduled jobs: the
/// UNIQUE (task_name, run_date) constraint makes the existence check and
/// the claim insert a single storage operation, so concurrent workers,
/// scheduler double-fires and manual triggers cannot all claim the same day.
#[derive(Clone)]
pub struct DailyTaskLogRepository {
    pool: PgPool,
}

impl DailyTaskLogRepository {
    /// Creates a new DailyTaskLogRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically claim (task_name, run_date). Returns the claim row id if
    /// this caller won, or None if the day was already claimed.
    pub async fn try_claim(
        &self,
        task_name: &str,
        run_date: NaiveDate,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO daily_task_logs (task_name, run_date)
            VALUES ($1, $2)
            ON CONFLICT (task_name, run_date) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(task_name)
        .bind(run_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id,)| id))
    }

    /// Whether a claim exists for (task_name, run_date).
    pub async fn has_run(&self, task_name: &str, run_date: NaiveDate) -> Result<bool, sqlx::Error> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id FROM daily_task_logs
            WHERE task_name = $1 AND run_date = $2
            "#,
        )
        .bind(task_name)
        .bind(run_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Record the outcome of a claimed run.
    pub async fn record_outcome(
        &self,
        claim_id: Uuid,
        outcome: TaskOutcome,
        detail: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE daily_task_logs
            SET completed_at = NOW(), outcome = $2, detail = $3
            WHERE id = $1
            "#,
        )
        .bind(claim_id)
        .bind(outcome.to_string())
        .bind(detail)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Latest run row for a task, if it ever ran.
    pub async fn last_run(
        &self,
        task_name: &str,
    ) -> Result<Option<DailyTaskLogEntity>, sqlx::Error> {
        sqlx::query_as::<_, DailyTaskLogEntity>(&format!(
            r#"
            SELECT {TASK_LOG_COLUMNS} FROM daily_task_logs
            WHERE task_name = $1
            ORDER BY run_date DESC
            LIMIT 1
            "#
        ))
        .bind(task_name)
        .fetch_optional(&self.pool)
        .await
    }

    /// Operator force-rerun path: delete the claim for (task_name,
    /// run_date) so the day becomes re-triggerable. Returns true if a claim
    /// row was removed.
    pub async fn clear_claim(
        &self,
        task_name: &str,
        run_date: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM daily_task_logs
            WHERE task_name = $1 AND run_date = $2
            "#,
        )
        .bind(task_name)
        .bind(run_date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
