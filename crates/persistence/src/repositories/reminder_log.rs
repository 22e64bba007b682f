//! Reminder log (notification ledger) repository.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{Channel, ReminderType};

/// Repository for the notification ledger.
///
/// The UNIQUE (payment_id, reminder_type, channel) constraint is the true
/// dedup guard; `sent_channels` is a pre-check optimization, and a conflict
/// on insert is interpreted as "already sent" rather than an error.
#[derive(Clone)]
pub struct ReminderLogRepository {
    pool: PgPool,
}

impl ReminderLogRepository {
    /// Creates a new ReminderLogRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether a ledger row exists for (payment, reminder_type, channel).
    pub async fn has_sent(
        &self,
        payment_id: Uuid,
        reminder_type: ReminderType,
        channel: Channel,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id FROM reminder_logs
            WHERE payment_id = $1 AND reminder_type = $2 AND channel = $3
            "#,
        )
        .bind(payment_id)
        .bind(reminder_type.to_string())
        .bind(channel.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Channels already logged for (payment, reminder_type).
    pub async fn sent_channels(
        &self,
        payment_id: Uuid,
        reminder_type: ReminderType,
    ) -> Result<Vec<Channel>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT channel FROM reminder_logs
            WHERE payment_id = $1 AND reminder_type = $2
            "#,
        )
        .bind(payment_id)
        .bind(reminder_type.to_string())
        .fetch_all(&self.pool)
        .await?;

        // The channel column is a closed set; an unknown value is corrupt
        // data, not a row to skip.
        rows.into_iter()
            .map(|(c,)| {
                c.trim()
                    .parse::<Channel>()
                    .map_err(|e| sqlx::Error::Decode(e.into()))
            })
            .collect()
    }

    /// Append a ledger row after a successful send. Returns true if the row
    /// was inserted, false if the triple was already logged (a concurrent
    /// dispatcher won the race - benign).
    pub async fn record_sent(
        &self,
        payment_id: Uuid,
        reminder_type: ReminderType,
        channel: Channel,
        payload_digest: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO reminder_logs (payment_id, reminder_type, channel, payload_digest)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (payment_id, reminder_type, channel) DO NOTHING
            "#,
        )
        .bind(payment_id)
        .bind(reminder_type.to_string())
        .bind(channel.to_string())
        .bind(payload_digest)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
