//! Reminder and scheduled-task domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Temporal relationship of a reminder to the payment's due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReminderType {
    /// Two days before the due date.
    Before,
    /// On the due date.
    On,
    /// Three days after the due date.
    After,
}

impl fmt::Display for ReminderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderType::Before => write!(f, "BEFORE"),
            ReminderType::On => write!(f, "ON"),
            ReminderType::After => write!(f, "AFTER"),
        }
    }
}

impl FromStr for ReminderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BEFORE" => Ok(ReminderType::Before),
            "ON" => Ok(ReminderType::On),
            "AFTER" => Ok(ReminderType::After),
            other => Err(format!("unknown reminder type: {}", other)),
        }
    }
}

/// Delivery medium for a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Channel {
    Email,
    Sms,
    Whatsapp,
}

impl Channel {
    /// All channels, in dispatch order.
    pub const ALL: [Channel; 3] = [Channel::Email, Channel::Sms, Channel::Whatsapp];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Email => write!(f, "EMAIL"),
            Channel::Sms => write!(f, "SMS"),
            Channel::Whatsapp => write!(f, "WHATSAPP"),
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMAIL" => Ok(Channel::Email),
            "SMS" => Ok(Channel::Sms),
            "WHATSAPP" => Ok(Channel::Whatsapp),
            other => Err(format!("unknown channel: {}", other)),
        }
    }
}

/// A reminder owed today for one outstanding payment.
///
/// `channels` holds only the channels still to attempt: eligible for the
/// tenant's contact details and without a ledger row yet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReminderCandidate {
    pub payment_id: Uuid,
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub property_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub period: String,
    pub amount_due: f64,
    pub due_date: NaiveDate,
    pub reminder_type: ReminderType,
    pub channels: Vec<Channel>,
}

/// Recorded outcome of a completed daily task run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskOutcome {
    Completed,
    Failed,
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskOutcome::Completed => write!(f, "completed"),
            TaskOutcome::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for TaskOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(TaskOutcome::Completed),
            "failed" => Ok(TaskOutcome::Failed),
            other => Err(format!("unknown task outcome: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_type_string_forms() {
        assert_eq!(ReminderType::Before.to_string(), "BEFORE");
        assert_eq!("ON".parse::<ReminderType>().unwrap(), ReminderType::On);
        assert_eq!("AFTER".parse::<ReminderType>().unwrap(), ReminderType::After);
        assert!("before".parse::<ReminderType>().is_err());
    }

    #[test]
    fn test_channel_string_forms() {
        assert_eq!(Channel::Whatsapp.to_string(), "WHATSAPP");
        assert_eq!("SMS".parse::<Channel>().unwrap(), Channel::Sms);
        assert!("sms".parse::<Channel>().is_err());
        assert!("PUSH".parse::<Channel>().is_err());
    }

    #[test]
    fn test_channel_all_order() {
        assert_eq!(
            Channel::ALL,
            [Channel::Email, Channel::Sms, Channel::Whatsapp]
        );
    }

    #[test]
    fn test_task_outcome_string_forms() {
        assert_eq!(TaskOutcome::Completed.to_string(), "completed");
        assert_eq!("failed".parse::<TaskOutcome>().unwrap(), TaskOutcome::Failed);
        assert!("ok".parse::<TaskOutcome>().is_err());
    }
}
