//! Channel sender abstractions.
//!
//! Thin seams over outbound delivery providers. Implementations live in the
//! api crate (console/SendGrid email, Twilio SMS/WhatsApp); the dispatcher
//! only sees these traits, so tests can substitute fakes.

use thiserror::Error;

/// Errors surfaced by a channel sender.
///
/// Transport failures come back as typed values rather than panics so the
/// dispatcher's loop can isolate them per channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("channel not configured: {0}")]
    NotConfigured(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("provider rejected message: {0}")]
    Rejected(String),

    #[error("send timed out after {0}s")]
    Timeout(u64),
}

/// Provider acknowledgement for a successful send.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    /// Provider-side reference id (message SID, SendGrid message id, ...).
    pub provider_id: String,
}

/// Outbound email delivery.
#[async_trait::async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<SendReceipt, ChannelError>;
}

/// Outbound SMS delivery.
#[async_trait::async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_sms(&self, to: &str, body: &str) -> Result<SendReceipt, ChannelError>;
}

/// Outbound WhatsApp delivery.
#[async_trait::async_trait]
pub trait WhatsappSender: Send + Sync {
    async fn send_whatsapp(&self, to: &str, body: &str) -> Result<SendReceipt, ChannelError>;
}
