//! Email channel sender.
//!
//! Supported providers:
//! - `console`: logs emails instead of sending (development)
//! - `sendgrid`: sends via the SendGrid v3 API

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::EmailConfig;
use domain::services::{ChannelError, EmailSender, SendReceipt};

/// Email service dispatching to the configured provider.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
    client: Client,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    async fn send_console(&self, to: &str, subject: &str, body: &str) -> SendReceipt {
        info!(
            to = %to,
            subject = %subject,
            from = %self.config.sender_email,
            "Email (console provider)"
        );
        debug!(body = %body, "Email body");

        SendReceipt {
            provider_id: format!("console-{}", Uuid::new_v4()),
        }
    }

    async fn send_sendgrid(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<SendReceipt, ChannelError> {
        if self.config.sendgrid_api_key.is_empty() {
            return Err(ChannelError::NotConfigured(
                "sendgrid_api_key not set".to_string(),
            ));
        }

        let payload = serde_json::json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name
            },
            "subject": subject,
            "content": [{ "type": "text/plain", "value": body }]
        });

        let response = self
            .client
            .post("https://api.sendgrid.com/v3/mail/send")
            .bearer_auth(&self.config.sendgrid_api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChannelError::Timeout(self.config.timeout_secs)
                } else {
                    ChannelError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            // SendGrid returns the message id in a response header.
            let provider_id = response
                .headers()
                .get("x-message-id")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .unwrap_or_else(|| format!("sendgrid-{}", Uuid::new_v4()));
            Ok(SendReceipt { provider_id })
        } else if status.is_server_error() {
            Err(ChannelError::Transport(format!(
                "sendgrid returned {}",
                status
            )))
        } else {
            let detail = response.text().await.unwrap_or_default();
            Err(ChannelError::Rejected(format!(
                "sendgrid returned {}: {}",
                status, detail
            )))
        }
    }
}

#[async_trait::async_trait]
impl EmailSender for EmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<SendReceipt, ChannelError> {
        if !self.config.enabled {
            return Err(ChannelError::NotConfigured(
                "email channel disabled".to_string(),
            ));
        }

        match self.config.provider.as_str() {
            "console" => Ok(self.send_console(to, subject, body).await),
            "sendgrid" => self.send_sendgrid(to, subject, body).await,
            provider => Err(ChannelError::NotConfigured(format!(
                "unknown email provider: {}",
                provider
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool, provider: &str) -> EmailConfig {
        EmailConfig {
            enabled,
            provider: provider.to_string(),
            sendgrid_api_key: String::new(),
            sender_email: "noreply@rentmanager.local".to_string(),
            sender_name: "Rent Manager".to_string(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_disabled_channel_is_not_configured() {
        let service = EmailService::new(config(false, "console"));
        let result = service.send_email("t@example.com", "Rent due", "body").await;
        assert!(matches!(result, Err(ChannelError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_console_provider_succeeds() {
        let service = EmailService::new(config(true, "console"));
        let receipt = service
            .send_email("t@example.com", "Rent due", "body")
            .await
            .unwrap();
        assert!(receipt.provider_id.starts_with("console-"));
    }

    #[tokio::test]
    async fn test_sendgrid_without_key_is_not_configured() {
        let service = EmailService::new(config(true, "sendgrid"));
        let result = service.send_email("t@example.com", "Rent due", "body").await;
        assert!(matches!(result, Err(ChannelError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_unknown_provider_is_not_configured() {
        let service = EmailService::new(config(true, "carrier-pigeon"));
        let result = service.send_email("t@example.com", "Rent due", "body").await;
        assert!(matches!(result, Err(ChannelError::NotConfigured(_))));
    }
}
