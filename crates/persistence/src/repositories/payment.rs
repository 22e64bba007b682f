//! Payment repository for database operations.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{OutstandingPaymentRow, PaymentEntity};
use domain::models::PaymentMode;

const PAYMENT_COLUMNS: &str = "id, tenant_id, period, rent_amount, maintenance_amount, status, \
     due_date, paid_on, payment_mode, last_reminder_at, created_at, updated_at";

/// Repository for payment database operations.
///
/// The UNIQUE (tenant_id, period) constraint is the idempotency anchor for
/// payment generation; `insert_pending` leans on it instead of a separate
/// existence check.
#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a PENDING due record for (tenant, period), snapshotting the
    /// given amounts. Returns true if a row was created, false if one
    /// already existed (the conflict is benign, not an error).
    pub async fn insert_pending(
        &self,
        tenant_id: Uuid,
        period: &str,
        rent_amount: f64,
        maintenance_amount: f64,
        due_date: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO payments (tenant_id, period, rent_amount, maintenance_amount, due_date)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (tenant_id, period) DO NOTHING
            "#,
        )
        .bind(tenant_id)
        .bind(period)
        .bind(rent_amount)
        .bind(maintenance_amount)
        .bind(due_date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find the payment for (tenant, period), if any.
    pub async fn find_by_tenant_and_period(
        &self,
        tenant_id: Uuid,
        period: &str,
    ) -> Result<Option<PaymentEntity>, sqlx::Error> {
        sqlx::query_as::<_, PaymentEntity>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE tenant_id = $1 AND period = $2"
        ))
        .bind(tenant_id)
        .bind(period)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find a payment by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentEntity>, sqlx::Error> {
        sqlx::query_as::<_, PaymentEntity>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// All outstanding (PENDING or LATE) payments joined with tenant contact
    /// details and property name. LEFT JOINs so a payment with a broken
    /// tenant/property link still comes back (with NULL columns) and can be
    /// skipped with a warning instead of failing the batch.
    pub async fn list_outstanding_with_tenants(
        &self,
    ) -> Result<Vec<OutstandingPaymentRow>, sqlx::Error> {
        sqlx::query_as::<_, OutstandingPaymentRow>(
            r#"
            SELECT p.id AS payment_id,
                   p.tenant_id,
                   p.period,
                   p.rent_amount,
                   p.maintenance_amount,
                   p.due_date,
                   t.name AS tenant_name,
                   t.email AS tenant_email,
                   t.phone AS tenant_phone,
                   pr.name AS property_name
            FROM payments p
            LEFT JOIN tenants t ON t.id = p.tenant_id
            LEFT JOIN properties pr ON pr.id = t.property_id
            WHERE p.status IN ('PENDING', 'LATE')
            ORDER BY p.due_date, p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Mark a payment PAID. Only PENDING or LATE payments transition (late
    /// payments remain payable); a PAID payment is terminal. Returns the
    /// updated row, or None if no transition applied.
    pub async fn mark_paid(
        &self,
        id: Uuid,
        paid_on: NaiveDate,
        mode: PaymentMode,
    ) -> Result<Option<PaymentEntity>, sqlx::Error> {
        sqlx::query_as::<_, PaymentEntity>(&format!(
            r#"
            UPDATE payments
            SET status = 'PAID', paid_on = $2, payment_mode = $3, updated_at = NOW()
            WHERE id = $1 AND status IN ('PENDING', 'LATE')
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(paid_on)
        .bind(mode.to_string())
        .fetch_optional(&self.pool)
        .await
    }

    /// Overdue sweep: PENDING payments whose due date has passed become
    /// LATE. Returns the number of rows transitioned.
    pub async fn mark_overdue(&self, as_of: NaiveDate) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = 'LATE', updated_at = NOW()
            WHERE status = 'PENDING' AND due_date < $1
            "#,
        )
        .bind(as_of)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Update the last-reminder marker. Informational only; the reminder
    /// ledger is the dedup source of truth.
    pub async fn touch_last_reminder(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE payments
            SET last_reminder_at = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
