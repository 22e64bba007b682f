//! Reminder evaluation and notification dispatch.
//!
//! The evaluator scans outstanding payments and decides which reminder (if
//! any) each one is owed today; the dispatcher fans a candidate out over
//! its remaining channels, isolating per-channel failures, and appends a
//! ledger row per successful send. The ledger's (payment, reminder_type,
//! channel) uniqueness is the dedup source of truth; a failed channel gets
//! no ledger row and is retried on the next eligible day.

use chrono::{DateTime, NaiveDate, Utc};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::middleware::metrics::record_reminder_send;
use crate::services::retry::RetryPolicy;
use domain::models::{Channel, ReminderCandidate, ReminderType};
use domain::services::{
    classify_reminder, eligible_channels, remaining_channels, ChannelError, EmailSender,
    SendReceipt, SmsSender, WhatsappSender,
};
use persistence::repositories::{PaymentRepository, ReminderLogRepository};

/// Per-candidate dispatch result.
#[derive(Debug, Clone, Default)]
pub struct DispatchOutcome {
    pub sent: Vec<Channel>,
    pub failed: Vec<Channel>,
}

/// Reminder evaluator + dispatcher.
pub struct ReminderService {
    payments: PaymentRepository,
    ledger: ReminderLogRepository,
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
    whatsapp: Arc<dyn WhatsappSender>,
    retry: RetryPolicy,
}

impl ReminderService {
    /// Create a new reminder service over the given store and senders.
    pub fn new(
        pool: PgPool,
        email: Arc<dyn EmailSender>,
        sms: Arc<dyn SmsSender>,
        whatsapp: Arc<dyn WhatsappSender>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            payments: PaymentRepository::new(pool.clone()),
            ledger: ReminderLogRepository::new(pool),
            email,
            sms,
            whatsapp,
            retry,
        }
    }

    /// Find every reminder owed on `as_of`.
    ///
    /// A candidate is an outstanding payment whose due date puts `as_of` in
    /// one of the three reminder windows, restricted to channels the tenant
    /// is reachable on that have no ledger row yet. Candidates with broken
    /// tenant links are skipped with a warning; the rest of the batch is
    /// unaffected.
    pub async fn find_due(
        &self,
        as_of: NaiveDate,
    ) -> Result<Vec<ReminderCandidate>, sqlx::Error> {
        let rows = self.payments.list_outstanding_with_tenants().await?;
        let mut candidates = Vec::new();

        for row in rows {
            let (tenant_name, phone) = match (row.tenant_name, row.tenant_phone) {
                (Some(name), Some(phone)) => (name, phone),
                _ => {
                    warn!(
                        payment_id = %row.payment_id,
                        tenant_id = %row.tenant_id,
                        "Skipping payment with missing tenant record"
                    );
                    continue;
                }
            };

            let Some(reminder_type) = classify_reminder(as_of, row.due_date) else {
                continue;
            };

            let eligible = eligible_channels(row.tenant_email.as_deref(), &phone);
            if eligible.is_empty() {
                warn!(
                    payment_id = %row.payment_id,
                    tenant_id = %row.tenant_id,
                    "Tenant has no reachable channel"
                );
                continue;
            }

            let already_sent: HashSet<Channel> = self
                .ledger
                .sent_channels(row.payment_id, reminder_type)
                .await?
                .into_iter()
                .collect();
            let channels = remaining_channels(&eligible, &already_sent);
            if channels.is_empty() {
                continue;
            }

            let property_name = row.property_name.unwrap_or_else(|| {
                warn!(
                    payment_id = %row.payment_id,
                    tenant_id = %row.tenant_id,
                    "Tenant has no linked property"
                );
                "your property".to_string()
            });

            candidates.push(ReminderCandidate {
                payment_id: row.payment_id,
                tenant_id: row.tenant_id,
                tenant_name,
                property_name,
                email: row.tenant_email,
                phone,
                period: row.period.trim().to_string(),
                amount_due: row.rent_amount + row.maintenance_amount,
                due_date: row.due_date,
                reminder_type,
                channels,
            });
        }

        Ok(candidates)
    }

    /// Send one attempt on one channel, with bounded retry.
    async fn send_channel(
        &self,
        channel: Channel,
        candidate: &ReminderCandidate,
        subject: &str,
        body: &str,
    ) -> Result<SendReceipt, ChannelError> {
        match channel {
            Channel::Email => {
                let to = candidate.email.as_deref().ok_or_else(|| {
                    ChannelError::NotConfigured("tenant has no email".to_string())
                })?;
                self.retry
                    .run("email", || self.email.send_email(to, subject, body))
                    .await
            }
            Channel::Sms => {
                self.retry
                    .run("sms", || self.sms.send_sms(&candidate.phone, body))
                    .await
            }
            Channel::Whatsapp => {
                self.retry
                    .run("whatsapp", || {
                        self.whatsapp.send_whatsapp(&candidate.phone, body)
                    })
                    .await
            }
        }
    }

    /// Dispatch one candidate across its remaining channels.
    ///
    /// Channel attempts are isolated: one provider failing never stops the
    /// others. Each successful send appends its ledger row before the next
    /// candidate is processed, so a crash mid-batch re-processes only
    /// unlogged work. No ledger row is written for failures.
    pub async fn dispatch(
        &self,
        candidate: &ReminderCandidate,
        now: DateTime<Utc>,
    ) -> Result<DispatchOutcome, sqlx::Error> {
        let (subject, body) = render_message(candidate);
        let digest = payload_digest(&body);
        let mut outcome = DispatchOutcome::default();

        for channel in &candidate.channels {
            match self
                .send_channel(*channel, candidate, &subject, &body)
                .await
            {
                Ok(receipt) => {
                    let inserted = self
                        .ledger
                        .record_sent(
                            candidate.payment_id,
                            candidate.reminder_type,
                            *channel,
                            &digest,
                        )
                        .await?;
                    if !inserted {
                        // A concurrent run logged this channel first. The
                        // message went out twice; the ledger stays single.
                        warn!(
                            payment_id = %candidate.payment_id,
                            channel = %channel,
                            "Ledger row already present after send"
                        );
                    }
                    record_reminder_send(&channel.to_string(), true);
                    info!(
                        payment_id = %candidate.payment_id,
                        tenant = %candidate.tenant_name,
                        reminder_type = %candidate.reminder_type,
                        channel = %channel,
                        provider_id = %receipt.provider_id,
                        "Reminder sent"
                    );
                    outcome.sent.push(*channel);
                }
                Err(err) => {
                    record_reminder_send(&channel.to_string(), false);
                    warn!(
                        payment_id = %candidate.payment_id,
                        reminder_type = %candidate.reminder_type,
                        channel = %channel,
                        error = %err,
                        "Reminder send failed"
                    );
                    outcome.failed.push(*channel);
                }
            }
        }

        if !outcome.sent.is_empty() {
            // Display hint only; never consulted for dedup.
            self.payments
                .touch_last_reminder(candidate.payment_id, now)
                .await?;
        }

        Ok(outcome)
    }
}

/// Render the reminder subject and body for a candidate.
pub fn render_message(candidate: &ReminderCandidate) -> (String, String) {
    let due = candidate.due_date.format("%d %b %Y");
    let subject = match candidate.reminder_type {
        ReminderType::Before => format!("Rent due soon for {}", candidate.property_name),
        ReminderType::On => format!("Rent due today for {}", candidate.property_name),
        ReminderType::After => format!("Rent overdue for {}", candidate.property_name),
    };

    let lead = match candidate.reminder_type {
        ReminderType::Before => format!("your rent is due on {}.", due),
        ReminderType::On => "your rent is due today.".to_string(),
        ReminderType::After => format!("your rent was due on {} and is still unpaid.", due),
    };

    let body = format!(
        "Hi {name}, {lead}\n\nProperty: {property}\nPeriod: {period}\nAmount due: {amount:.2}\n\nPlease make the payment at your earliest convenience.",
        name = candidate.tenant_name,
        lead = lead,
        property = candidate.property_name,
        period = candidate.period,
        amount = candidate.amount_due,
    );

    (subject, body)
}

/// SHA-256 hex digest of a message body, stored with each ledger row.
pub fn payload_digest(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn candidate(reminder_type: ReminderType, channels: Vec<Channel>) -> ReminderCandidate {
        ReminderCandidate {
            payment_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            tenant_name: "Asha Verma".to_string(),
            property_name: "Lakeside Apartments".to_string(),
            email: Some("asha@example.com".to_string()),
            phone: "+919876543210".to_string(),
            period: "2025-03".to_string(),
            amount_due: 11500.0,
            due_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            reminder_type,
            channels,
        }
    }

    #[test]
    fn test_render_message_by_type() {
        let before = candidate(ReminderType::Before, vec![Channel::Email]);
        let (subject, body) = render_message(&before);
        assert_eq!(subject, "Rent due soon for Lakeside Apartments");
        assert!(body.contains("due on 05 Mar 2025"));
        assert!(body.contains("Amount due: 11500.00"));
        assert!(body.contains("Period: 2025-03"));

        let on = candidate(ReminderType::On, vec![Channel::Email]);
        let (subject, body) = render_message(&on);
        assert_eq!(subject, "Rent due today for Lakeside Apartments");
        assert!(body.contains("due today"));

        let after = candidate(ReminderType::After, vec![Channel::Email]);
        let (subject, body) = render_message(&after);
        assert_eq!(subject, "Rent overdue for Lakeside Apartments");
        assert!(body.contains("still unpaid"));
    }

    #[test]
    fn test_payload_digest_is_hex_sha256() {
        let digest = payload_digest("rent due");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        // Stable across calls for the same body.
        assert_eq!(digest, payload_digest("rent due"));
        assert_ne!(digest, payload_digest("rent overdue"));
    }
}
