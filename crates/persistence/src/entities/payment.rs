//! Payment entity definitions.

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{Payment, PaymentMode, PaymentStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the payments table.
#[derive(Debug, Clone, FromRow)]
pub struct PaymentEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub period: String,
    pub rent_amount: f64,
    pub maintenance_amount: f64,
    pub status: String,
    pub due_date: NaiveDate,
    pub paid_on: Option<NaiveDate>,
    pub payment_mode: Option<String>,
    pub last_reminder_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentEntity> for Payment {
    type Error = String;

    fn try_from(e: PaymentEntity) -> Result<Self, Self::Error> {
        let status: PaymentStatus = e.status.parse()?;
        let payment_mode = e
            .payment_mode
            .as_deref()
            .map(str::parse::<PaymentMode>)
            .transpose()?;
        Ok(Payment {
            id: e.id,
            tenant_id: e.tenant_id,
            period: e.period.trim().to_string(),
            rent_amount: e.rent_amount,
            maintenance_amount: e.maintenance_amount,
            status,
            due_date: e.due_date,
            paid_on: e.paid_on,
            payment_mode,
            last_reminder_at: e.last_reminder_at,
            created_at: e.created_at,
            updated_at: e.updated_at,
        })
    }
}

/// An outstanding payment joined with its tenant's contact details and the
/// property name, as returned by the evaluator query. Tenant/property
/// columns are nullable so broken foreign links surface as skippable rows
/// instead of failing the whole batch.
#[derive(Debug, Clone, FromRow)]
pub struct OutstandingPaymentRow {
    pub payment_id: Uuid,
    pub tenant_id: Uuid,
    pub period: String,
    pub rent_amount: f64,
    pub maintenance_amount: f64,
    pub due_date: NaiveDate,
    pub tenant_name: Option<String>,
    pub tenant_email: Option<String>,
    pub tenant_phone: Option<String>,
    pub property_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(status: &str, mode: Option<&str>) -> PaymentEntity {
        PaymentEntity {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            period: "2025-03".to_string(),
            rent_amount: 10000.0,
            maintenance_amount: 1500.0,
            status: status.to_string(),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            paid_on: None,
            payment_mode: mode.map(str::to_string),
            last_reminder_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_parsed_to_enum() {
        let payment = Payment::try_from(entity("LATE", None)).unwrap();
        assert_eq!(payment.status, PaymentStatus::Late);
        assert_eq!(payment.amount_due(), 11500.0);
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(Payment::try_from(entity("overdue", None)).is_err());
    }

    #[test]
    fn test_payment_mode_parsed() {
        let payment = Payment::try_from(entity("PAID", Some("UPI"))).unwrap();
        assert_eq!(payment.payment_mode, Some(PaymentMode::Upi));
        assert!(Payment::try_from(entity("PAID", Some("paypal"))).is_err());
    }

    #[test]
    fn test_char_column_padding_trimmed() {
        let mut e = entity("PENDING", None);
        // CHAR(7) columns come back space-padded if a short value sneaks in.
        e.period = "2025-03".to_string();
        let payment = Payment::try_from(e).unwrap();
        assert_eq!(payment.period, "2025-03");
    }
}
