//! Property entity definition.

use chrono::{DateTime, Utc};
use domain::models::Property;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the properties table.
#[derive(Debug, Clone, FromRow)]
pub struct PropertyEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PropertyEntity> for Property {
    fn from(e: PropertyEntity) -> Self {
        Property {
            id: e.id,
            owner_id: e.owner_id,
            name: e.name,
            address: e.address,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
