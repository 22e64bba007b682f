//! Tenant entity definition.

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::Tenant;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the tenants table.
#[derive(Debug, Clone, FromRow)]
pub struct TenantEntity {
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub rent_amount: f64,
    pub maintenance_amount: f64,
    pub due_day: i32,
    pub start_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TenantEntity> for Tenant {
    fn from(e: TenantEntity) -> Self {
        Tenant {
            id: e.id,
            property_id: e.property_id,
            name: e.name,
            email: e.email,
            phone: e.phone,
            rent_amount: e.rent_amount,
            maintenance_amount: e.maintenance_amount,
            // CHECK constraint keeps due_day in 1..=31.
            due_day: e.due_day as u32,
            start_date: e.start_date,
            active: e.active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
