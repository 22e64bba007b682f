//! Reminder log (notification ledger) entity definition.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the reminder_logs table.
///
/// Append-only: one row per (payment, reminder_type, channel) ever
/// dispatched successfully. Rows are never mutated or deleted.
#[derive(Debug, Clone, FromRow)]
pub struct ReminderLogEntity {
    pub id: Uuid,
    pub payment_id: Uuid,
    pub reminder_type: String,
    pub channel: String,
    /// SHA-256 hex digest of the dispatched message body.
    pub payload_digest: String,
    pub sent_at: DateTime<Utc>,
}
