//! Domain services: reminder policy and channel sender abstractions.

pub mod channel;
pub mod reminder_policy;

pub use channel::{ChannelError, EmailSender, SendReceipt, SmsSender, WhatsappSender};
pub use reminder_policy::{classify_reminder, eligible_channels, remaining_channels};
