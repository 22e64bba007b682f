//! Services: channel senders, payment generation, reminder evaluation and
//! dispatch.

pub mod email;
pub mod payment_generator;
pub mod reminder;
pub mod retry;
pub mod twilio;

pub use email::EmailService;
pub use payment_generator::PaymentGeneratorService;
pub use reminder::{DispatchOutcome, ReminderService};
pub use retry::RetryPolicy;
pub use twilio::TwilioService;
