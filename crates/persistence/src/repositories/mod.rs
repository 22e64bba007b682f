//! Repository implementations for database operations.

mod daily_task_log;
mod lease;
mod payment;
mod property;
mod reminder_log;
mod tenant;

pub use daily_task_log::DailyTaskLogRepository;
pub use lease::LeaseRepository;
pub use payment::PaymentRepository;
pub use property::PropertyRepository;
pub use reminder_log::ReminderLogRepository;
pub use tenant::TenantRepository;
