//! Reminder classification and channel eligibility.
//!
//! Pure decision logic for the reminder pipeline: given a due date and a
//! calendar date, which reminder (if any) is owed today, and over which
//! channels. Dedup is channel-level: a ledger row for one channel never
//! suppresses the others.

use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

use crate::models::{Channel, ReminderType};

/// Days before the due date the BEFORE reminder fires.
pub const BEFORE_OFFSET_DAYS: i64 = 2;

/// Days after the due date the AFTER reminder fires.
pub const AFTER_OFFSET_DAYS: i64 = 3;

/// Classify `as_of` against the due date's reminder windows.
///
/// Exactly three dates around a due date D produce a reminder: D-2
/// (BEFORE), D (ON) and D+3 (AFTER). Every other offset yields `None`.
pub fn classify_reminder(as_of: NaiveDate, due_date: NaiveDate) -> Option<ReminderType> {
    if as_of == due_date - Duration::days(BEFORE_OFFSET_DAYS) {
        Some(ReminderType::Before)
    } else if as_of == due_date {
        Some(ReminderType::On)
    } else if as_of == due_date + Duration::days(AFTER_OFFSET_DAYS) {
        Some(ReminderType::After)
    } else {
        None
    }
}

/// Channels a tenant can be reached on: email requires an address, SMS and
/// WhatsApp require a phone number.
pub fn eligible_channels(email: Option<&str>, phone: &str) -> Vec<Channel> {
    let mut channels = Vec::new();
    if email.is_some_and(|e| !e.is_empty()) {
        channels.push(Channel::Email);
    }
    if !phone.is_empty() {
        channels.push(Channel::Sms);
        channels.push(Channel::Whatsapp);
    }
    channels
}

/// Filter eligible channels down to those without a ledger row yet.
pub fn remaining_channels(eligible: &[Channel], already_sent: &HashSet<Channel>) -> Vec<Channel> {
    eligible
        .iter()
        .copied()
        .filter(|c| !already_sent.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_classify_before_on_after() {
        let due = date(2025, 3, 5);
        assert_eq!(
            classify_reminder(date(2025, 3, 3), due),
            Some(ReminderType::Before)
        );
        assert_eq!(
            classify_reminder(date(2025, 3, 5), due),
            Some(ReminderType::On)
        );
        assert_eq!(
            classify_reminder(date(2025, 3, 8), due),
            Some(ReminderType::After)
        );
    }

    #[test]
    fn test_classify_other_offsets_not_due() {
        let due = date(2025, 3, 5);
        for day in [1, 2, 4, 6, 7, 9, 15] {
            assert_eq!(classify_reminder(date(2025, 3, day), due), None);
        }
        // D+10 and far past.
        assert_eq!(classify_reminder(date(2025, 3, 15), due), None);
        assert_eq!(classify_reminder(date(2025, 4, 5), due), None);
    }

    #[test]
    fn test_classify_across_month_boundary() {
        // Due on the 1st: BEFORE falls in the previous month.
        let due = date(2025, 4, 1);
        assert_eq!(
            classify_reminder(date(2025, 3, 30), due),
            Some(ReminderType::Before)
        );
        // Due at month end: AFTER falls in the next month.
        let due = date(2025, 3, 31);
        assert_eq!(
            classify_reminder(date(2025, 4, 3), due),
            Some(ReminderType::After)
        );
    }

    #[test]
    fn test_eligible_channels() {
        assert_eq!(
            eligible_channels(Some("a@b.com"), "+911234567890"),
            vec![Channel::Email, Channel::Sms, Channel::Whatsapp]
        );
        assert_eq!(
            eligible_channels(None, "+911234567890"),
            vec![Channel::Sms, Channel::Whatsapp]
        );
        assert_eq!(eligible_channels(Some("a@b.com"), ""), vec![Channel::Email]);
        assert_eq!(eligible_channels(Some(""), ""), Vec::<Channel>::new());
    }

    #[test]
    fn test_remaining_channels_channel_level_dedup() {
        let eligible = vec![Channel::Email, Channel::Sms, Channel::Whatsapp];

        // EMAIL already logged: SMS and WhatsApp are still attempted.
        let sent: HashSet<Channel> = [Channel::Email].into_iter().collect();
        assert_eq!(
            remaining_channels(&eligible, &sent),
            vec![Channel::Sms, Channel::Whatsapp]
        );

        // Everything logged: nothing left.
        let all: HashSet<Channel> = Channel::ALL.into_iter().collect();
        assert!(remaining_channels(&eligible, &all).is_empty());

        // Nothing logged: everything attempted.
        assert_eq!(remaining_channels(&eligible, &HashSet::new()), eligible);
    }
}
