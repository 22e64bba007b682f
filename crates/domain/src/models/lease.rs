//! Lease domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Lease lifecycle status.
///
/// `Active -> Ended` only (sweep on expiry or manual landlord action);
/// an ended lease never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseStatus {
    Active,
    Ended,
}

impl fmt::Display for LeaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaseStatus::Active => write!(f, "active"),
            LeaseStatus::Ended => write!(f, "ended"),
        }
    }
}

impl FromStr for LeaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(LeaseStatus::Active),
            "ended" => Ok(LeaseStatus::Ended),
            other => Err(format!("unknown lease status: {}", other)),
        }
    }
}

/// Links a tenant to a property for a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Lease {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub due_day: u32,
    pub status: LeaseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lease {
    /// Whether this lease's end date has passed as of the given date.
    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        self.end_date < as_of
    }
}

/// Request payload for creating a lease.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateLeaseRequest {
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[validate(range(min = 1, max = 31, message = "Due day must be 1-31"))]
    pub due_day: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_forms() {
        assert_eq!(LeaseStatus::Active.to_string(), "active");
        assert_eq!("ended".parse::<LeaseStatus>().unwrap(), LeaseStatus::Ended);
        assert!("ACTIVE".parse::<LeaseStatus>().is_err());
        assert!("expired".parse::<LeaseStatus>().is_err());
    }

    #[test]
    fn test_is_expired() {
        let lease = Lease {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            due_day: 5,
            status: LeaseStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(!lease.is_expired(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
        assert!(lease.is_expired(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
    }
}
