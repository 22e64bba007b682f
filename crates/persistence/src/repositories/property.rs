//! Property repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PropertyEntity;
use domain::models::CreatePropertyRequest;

/// Repository for property database operations.
#[derive(Clone)]
pub struct PropertyRepository {
    pool: PgPool,
}

impl PropertyRepository {
    /// Creates a new PropertyRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a property by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PropertyEntity>, sqlx::Error> {
        sqlx::query_as::<_, PropertyEntity>(
            r#"
            SELECT id, owner_id, name, address, created_at, updated_at
            FROM properties
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Create a property for a landlord.
    pub async fn create(&self, req: &CreatePropertyRequest) -> Result<PropertyEntity, sqlx::Error> {
        sqlx::query_as::<_, PropertyEntity>(
            r#"
            INSERT INTO properties (owner_id, name, address)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, name, address, created_at, updated_at
            "#,
        )
        .bind(req.owner_id)
        .bind(&req.name)
        .bind(&req.address)
        .fetch_one(&self.pool)
        .await
    }
}
