//! Payment domain model and billing-period arithmetic.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Status of a billing-period due record.
///
/// Transitions: `Pending -> Paid` (terminal), `Pending -> Late -> Paid`
/// (late payments remain payable). Nothing ever reverts to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Late,
}

impl PaymentStatus {
    /// Whether this record still awaits money (and therefore reminders).
    pub fn is_outstanding(&self) -> bool {
        matches!(self, PaymentStatus::Pending | PaymentStatus::Late)
    }

    /// Whether the given transition is allowed by the status state machine.
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Pending, PaymentStatus::Paid)
                | (PaymentStatus::Pending, PaymentStatus::Late)
                | (PaymentStatus::Late, PaymentStatus::Paid)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Paid => write!(f, "PAID"),
            PaymentStatus::Late => write!(f, "LATE"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PAID" => Ok(PaymentStatus::Paid),
            "LATE" => Ok(PaymentStatus::Late),
            other => Err(format!("unknown payment status: {}", other)),
        }
    }
}

/// How a payment was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMode {
    Cash,
    Upi,
    BankTransfer,
    Cheque,
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMode::Cash => write!(f, "CASH"),
            PaymentMode::Upi => write!(f, "UPI"),
            PaymentMode::BankTransfer => write!(f, "BANK_TRANSFER"),
            PaymentMode::Cheque => write!(f, "CHEQUE"),
        }
    }
}

impl FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CASH" => Ok(PaymentMode::Cash),
            "UPI" => Ok(PaymentMode::Upi),
            "BANK_TRANSFER" => Ok(PaymentMode::BankTransfer),
            "CHEQUE" => Ok(PaymentMode::Cheque),
            other => Err(format!("unknown payment mode: {}", other)),
        }
    }
}

/// Error from parsing a "YYYY-MM" period string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid billing period '{0}', expected YYYY-MM")]
pub struct PeriodParseError(pub String);

/// A billing cycle identified by year and month ("YYYY-MM").
///
/// Periods are keyed by month, not by date, so the day-of-month rent is
/// due stays independent of the period key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BillingPeriod {
    year: i32,
    month: u32,
}

impl BillingPeriod {
    /// Create a period, rejecting out-of-range months.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The period containing the given date.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Number of days in this period's month.
    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("first of month is always valid");
        first_of_next.pred_opt().expect("month has a last day").day()
    }

    /// The concrete date rent falls due in this period, clamping `due_day`
    /// to the month length (due-day 31 in February yields Feb 28/29). The
    /// stored due-day itself is never changed.
    pub fn due_date(&self, due_day: u32) -> NaiveDate {
        let day = due_day.clamp(1, self.days_in_month());
        NaiveDate::from_ymd_opt(self.year, self.month, day)
            .expect("clamped day is always valid")
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for BillingPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PeriodParseError(s.to_string());
        let (year_str, month_str) = s.split_once('-').ok_or_else(err)?;
        if year_str.len() != 4 || month_str.len() != 2 {
            return Err(err());
        }
        let year: i32 = year_str.parse().map_err(|_| err())?;
        let month: u32 = month_str.parse().map_err(|_| err())?;
        BillingPeriod::new(year, month).ok_or_else(err)
    }
}

/// One due record per (tenant, billing period).
///
/// Amounts are snapshotted from the tenant at generation time and do not
/// follow later rate changes. Paid records are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Payment {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// "YYYY-MM" period key; unique together with `tenant_id`.
    pub period: String,
    pub rent_amount: f64,
    pub maintenance_amount: f64,
    pub status: PaymentStatus,
    /// Concrete due date, clamped to the period's month length.
    pub due_date: NaiveDate,
    pub paid_on: Option<NaiveDate>,
    pub payment_mode: Option<PaymentMode>,
    /// Display hint only; the reminder ledger is the dedup source of truth.
    pub last_reminder_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Total amount owed for the period.
    pub fn amount_due(&self) -> f64 {
        self.rent_amount + self.maintenance_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse_roundtrip() {
        let period: BillingPeriod = "2025-03".parse().unwrap();
        assert_eq!(period.year(), 2025);
        assert_eq!(period.month(), 3);
        assert_eq!(period.to_string(), "2025-03");
    }

    #[test]
    fn test_period_parse_rejects_garbage() {
        assert!("2025".parse::<BillingPeriod>().is_err());
        assert!("2025-13".parse::<BillingPeriod>().is_err());
        assert!("2025-00".parse::<BillingPeriod>().is_err());
        assert!("25-03".parse::<BillingPeriod>().is_err());
        assert!("2025-3".parse::<BillingPeriod>().is_err());
        assert!("2025-03-01".parse::<BillingPeriod>().is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(BillingPeriod::new(2025, 1).unwrap().days_in_month(), 31);
        assert_eq!(BillingPeriod::new(2025, 2).unwrap().days_in_month(), 28);
        assert_eq!(BillingPeriod::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(BillingPeriod::new(2025, 4).unwrap().days_in_month(), 30);
        assert_eq!(BillingPeriod::new(2025, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_due_date_clamped_to_month_length() {
        // Due-day 31 in a 28-day February clamps to Feb 28.
        let feb = BillingPeriod::new(2025, 2).unwrap();
        assert_eq!(
            feb.due_date(31),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );

        let leap_feb = BillingPeriod::new(2024, 2).unwrap();
        assert_eq!(
            leap_feb.due_date(31),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );

        let march = BillingPeriod::new(2025, 3).unwrap();
        assert_eq!(
            march.due_date(5),
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
        );
    }

    #[test]
    fn test_containing() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        assert_eq!(BillingPeriod::containing(date).to_string(), "2025-03");
    }

    #[test]
    fn test_status_transitions() {
        use PaymentStatus::*;
        assert!(Pending.can_transition_to(Paid));
        assert!(Pending.can_transition_to(Late));
        assert!(Late.can_transition_to(Paid));

        assert!(!Paid.can_transition_to(Pending));
        assert!(!Paid.can_transition_to(Late));
        assert!(!Late.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_status_string_forms() {
        assert_eq!(PaymentStatus::Pending.to_string(), "PENDING");
        assert_eq!("LATE".parse::<PaymentStatus>().unwrap(), PaymentStatus::Late);
        // Casing is strict: the closed enum rejects legacy lowercase forms.
        assert!("pending".parse::<PaymentStatus>().is_err());
        assert!("OVERDUE".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_outstanding() {
        assert!(PaymentStatus::Pending.is_outstanding());
        assert!(PaymentStatus::Late.is_outstanding());
        assert!(!PaymentStatus::Paid.is_outstanding());
    }
}
