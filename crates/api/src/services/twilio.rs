//! Twilio channel sender for SMS and WhatsApp.
//!
//! Uses the Twilio Messages REST API (form-encoded POST, basic auth). One
//! service implements both traits; WhatsApp differs only in the
//! `whatsapp:`-prefixed addresses.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::TwilioConfig;
use domain::services::{ChannelError, SendReceipt, SmsSender, WhatsappSender};

/// Twilio Messages API response (fields we read).
#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

/// Twilio API error response.
#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    message: String,
    #[serde(default)]
    code: i64,
}

/// SMS / WhatsApp sender backed by the Twilio REST API.
#[derive(Clone)]
pub struct TwilioService {
    config: TwilioConfig,
    client: Client,
}

impl TwilioService {
    /// Creates a new TwilioService with the given configuration.
    pub fn new(config: TwilioConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn messages_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.account_sid
        )
    }

    /// POST a message to the Twilio API and map the response to a receipt.
    async fn send_message(
        &self,
        from: &str,
        to: &str,
        body: &str,
    ) -> Result<SendReceipt, ChannelError> {
        if !self.config.enabled {
            return Err(ChannelError::NotConfigured(
                "twilio channel disabled".to_string(),
            ));
        }
        if self.config.account_sid.is_empty() || self.config.auth_token.is_empty() {
            return Err(ChannelError::NotConfigured(
                "twilio credentials not set".to_string(),
            ));
        }
        if from.is_empty() {
            return Err(ChannelError::NotConfigured(
                "twilio sender number not set".to_string(),
            ));
        }

        let params = [("From", from), ("To", to), ("Body", body)];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
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
            let message: MessageResponse = response
                .json()
                .await
                .map_err(|e| ChannelError::Transport(e.to_string()))?;
            debug!(sid = %message.sid, to = %to, "Twilio message accepted");
            Ok(SendReceipt {
                provider_id: message.sid,
            })
        } else if status.is_server_error() {
            Err(ChannelError::Transport(format!(
                "twilio returned {}",
                status
            )))
        } else {
            let detail = response
                .json::<TwilioErrorResponse>()
                .await
                .map(|e| format!("{} (code {})", e.message, e.code))
                .unwrap_or_else(|_| status.to_string());
            Err(ChannelError::Rejected(detail))
        }
    }
}

#[async_trait::async_trait]
impl SmsSender for TwilioService {
    async fn send_sms(&self, to: &str, body: &str) -> Result<SendReceipt, ChannelError> {
        let from = self.config.sms_from.clone();
        self.send_message(&from, to, body).await
    }
}

#[async_trait::async_trait]
impl WhatsappSender for TwilioService {
    async fn send_whatsapp(&self, to: &str, body: &str) -> Result<SendReceipt, ChannelError> {
        let from = format!("whatsapp:{}", self.config.whatsapp_from);
        let to = format!("whatsapp:{}", to);
        self.send_message(&from, &to, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool) -> TwilioConfig {
        TwilioConfig {
            enabled,
            account_sid: "ACtest".to_string(),
            auth_token: "secret".to_string(),
            sms_from: "+15005550006".to_string(),
            whatsapp_from: "+15005550006".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_messages_url() {
        let service = TwilioService::new(config(true));
        assert_eq!(
            service.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/ACtest/Messages.json"
        );
    }

    #[tokio::test]
    async fn test_disabled_channel_is_not_configured() {
        let service = TwilioService::new(config(false));
        let result = service.send_sms("+919876543210", "rent due").await;
        assert!(matches!(result, Err(ChannelError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_missing_credentials_not_configured() {
        let mut cfg = config(true);
        cfg.account_sid = String::new();
        let service = TwilioService::new(cfg);
        let result = service.send_sms("+919876543210", "rent due").await;
        assert!(matches!(result, Err(ChannelError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_missing_sms_from_not_configured() {
        let mut cfg = config(true);
        cfg.sms_from = String::new();
        let service = TwilioService::new(cfg);
        let result = service.send_sms("+919876543210", "rent due").await;
        assert!(matches!(result, Err(ChannelError::NotConfigured(_))));
    }
}
