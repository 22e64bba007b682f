//! Lease entity definition.

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{Lease, LeaseStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the leases table.
#[derive(Debug, Clone, FromRow)]
pub struct LeaseEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub due_day: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<LeaseEntity> for Lease {
    type Error = String;

    fn try_from(e: LeaseEntity) -> Result<Self, Self::Error> {
        let status: LeaseStatus = e.status.parse()?;
        Ok(Lease {
            id: e.id,
            tenant_id: e.tenant_id,
            property_id: e.property_id,
            start_date: e.start_date,
            end_date: e.end_date,
            due_day: e.due_day as u32,
            status,
            created_at: e.created_at,
            updated_at: e.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_rejected() {
        let entity = LeaseEntity {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            due_day: 5,
            status: "expired".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(Lease::try_from(entity).is_err());
    }
}
