//! Lease repository for database operations.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::LeaseEntity;
use domain::models::CreateLeaseRequest;

const LEASE_COLUMNS: &str =
    "id, tenant_id, property_id, start_date, end_date, due_day, status, created_at, updated_at";

/// Repository for lease database operations.
#[derive(Clone)]
pub struct LeaseRepository {
    pool: PgPool,
}

impl LeaseRepository {
    /// Creates a new LeaseRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a lease by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<LeaseEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeaseEntity>(&format!(
            "SELECT {LEASE_COLUMNS} FROM leases WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Create an active lease.
    pub async fn create(&self, req: &CreateLeaseRequest) -> Result<LeaseEntity, sqlx::Error> {
        sqlx::query_as::<_, LeaseEntity>(&format!(
            r#"
            INSERT INTO leases (tenant_id, property_id, start_date, end_date, due_day)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {LEASE_COLUMNS}
            "#
        ))
        .bind(req.tenant_id)
        .bind(req.property_id)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.due_day as i32)
        .fetch_one(&self.pool)
        .await
    }

    /// Manually end a lease. Returns false if it was not active.
    pub async fn end(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE leases
            SET status = 'ended', updated_at = NOW()
            WHERE id = $1 AND status = 'active'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Expiry sweep: transition active leases whose end date has passed to
    /// 'ended'. The status guard makes the transition one-way, so re-running
    /// the sweep never flips a lease twice. Returns the number ended.
    pub async fn end_expired(&self, as_of: NaiveDate) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE leases
            SET status = 'ended', updated_at = NOW()
            WHERE status = 'active' AND end_date < $1
            "#,
        )
        .bind(as_of)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
