//! Database entity definitions (row mappings).

mod daily_task_log;
mod lease;
mod payment;
mod property;
mod reminder_log;
mod tenant;

pub use daily_task_log::DailyTaskLogEntity;
pub use lease::LeaseEntity;
pub use payment::{OutstandingPaymentRow, PaymentEntity};
pub use property::PropertyEntity;
pub use reminder_log::ReminderLogEntity;
pub use tenant::TenantEntity;
