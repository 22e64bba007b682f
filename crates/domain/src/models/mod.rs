//! Domain model definitions.

mod lease;
mod payment;
mod property;
mod reminder;
mod tenant;

pub use lease::{CreateLeaseRequest, Lease, LeaseStatus};
pub use payment::{BillingPeriod, Payment, PaymentMode, PaymentStatus, PeriodParseError};
pub use property::{CreatePropertyRequest, Property};
pub use reminder::{Channel, ReminderCandidate, ReminderType, TaskOutcome};
pub use tenant::{CreateTenantRequest, Tenant};
