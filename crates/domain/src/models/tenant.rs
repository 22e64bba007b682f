//! Tenant domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A renter attached to exactly one property.
///
/// Tenants are soft-deactivated (`active = false`), never deleted, so that
/// their payment history is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Tenant {
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: String,
    /// Optional; tenants without an email only receive SMS/WhatsApp.
    pub email: Option<String>,
    pub phone: String,
    pub rent_amount: f64,
    pub maintenance_amount: f64,
    /// Day of month rent falls due (1-31). Clamped to the actual month
    /// length when a concrete due date is derived, never mutated here.
    pub due_day: u32,
    pub start_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a tenant.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTenantRequest {
    pub property_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 7, max = 20, message = "Phone must be 7-20 characters"))]
    pub phone: String,

    #[validate(range(min = 0.0, message = "Rent amount must not be negative"))]
    pub rent_amount: f64,

    #[validate(range(min = 0.0, message = "Maintenance amount must not be negative"))]
    #[serde(default)]
    pub maintenance_amount: f64,

    #[validate(range(min = 1, max = 31, message = "Due day must be 1-31"))]
    pub due_day: u32,

    pub start_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateTenantRequest {
        CreateTenantRequest {
            property_id: Uuid::new_v4(),
            name: "Asha Verma".to_string(),
            email: Some("asha@example.com".to_string()),
            phone: "+919876543210".to_string(),
            rent_amount: 10000.0,
            maintenance_amount: 1500.0,
            due_day: 5,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_due_day_bounds() {
        let mut req = valid_request();
        req.due_day = 0;
        assert!(req.validate().is_err());
        req.due_day = 32;
        assert!(req.validate().is_err());
        req.due_day = 31;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_email_optional_but_validated() {
        let mut req = valid_request();
        req.email = None;
        assert!(req.validate().is_ok());
        req.email = Some("not-an-email".to_string());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_rent_rejected() {
        let mut req = valid_request();
        req.rent_amount = -1.0;
        assert!(req.validate().is_err());
    }
}
