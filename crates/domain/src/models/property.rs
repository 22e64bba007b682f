//! Property domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A rentable property owned by a single landlord.
///
/// A property owns its tenants; removing a property is a deliberate
/// decision because the tenants' payments are financial records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Property {
    pub id: Uuid,
    /// Landlord (user) that owns this property.
    pub owner_id: Uuid,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a property.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreatePropertyRequest {
    pub owner_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Address must be 1-255 characters"))]
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let req = CreatePropertyRequest {
            owner_id: Uuid::new_v4(),
            name: "Lakeside Apartments".to_string(),
            address: "12 Lake Road".to_string(),
        };
        assert!(req.validate().is_ok());

        let empty_name = CreatePropertyRequest {
            owner_id: Uuid::new_v4(),
            name: String::new(),
            address: "12 Lake Road".to_string(),
        };
        assert!(empty_name.validate().is_err());
    }
}
