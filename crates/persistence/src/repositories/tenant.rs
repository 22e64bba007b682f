//! Tenant repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::TenantEntity;
use domain::models::CreateTenantRequest;

const TENANT_COLUMNS: &str = "id, property_id, name, email, phone, rent_amount, \
     maintenance_amount, due_day, start_date, active, created_at, updated_at";

/// Repository for tenant database operations.
#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    /// Creates a new TenantRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all active tenants. This is the payment generator's input set.
    pub async fn list_active(&self) -> Result<Vec<TenantEntity>, sqlx::Error> {
        sqlx::query_as::<_, TenantEntity>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE active ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// Find a tenant by id, active or not.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TenantEntity>, sqlx::Error> {
        sqlx::query_as::<_, TenantEntity>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Create a tenant under a property.
    pub async fn create(&self, req: &CreateTenantRequest) -> Result<TenantEntity, sqlx::Error> {
        sqlx::query_as::<_, TenantEntity>(&format!(
            r#"
            INSERT INTO tenants (property_id, name, email, phone, rent_amount,
                                 maintenance_amount, due_day, start_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {TENANT_COLUMNS}
            "#
        ))
        .bind(req.property_id)
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(req.rent_amount)
        .bind(req.maintenance_amount)
        .bind(req.due_day as i32)
        .bind(req.start_date)
        .fetch_one(&self.pool)
        .await
    }

    /// Soft-deactivate a tenant, preserving payment history.
    /// Returns false if the tenant does not exist.
    pub async fn deactivate(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tenants
            SET active = FALSE, updated_at = NOW()
            WHERE id = $1 AND active
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_list_matches_entity() {
        // Column names must cover every TenantEntity field for FromRow.
        let columns: Vec<&str> = TENANT_COLUMNS.split(',').map(str::trim).collect();
        assert_eq!(columns.len(), 12);
        assert_eq!(columns[0], "id");
        assert_eq!(columns[11], "updated_at");
    }
}
