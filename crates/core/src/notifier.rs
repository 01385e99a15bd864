use std::time::Duration;

use reqwest::blocking::Client;

use crate::{payload::NotificationPayload, SyncError};

/// Delivers a rendered payload to a chat webhook.
pub trait Notifier {
    fn send(&self, payload: &NotificationPayload, webhook_url: &str) -> Result<(), SyncError>;

    fn name(&self) -> &str;
}

/// Slack-compatible incoming webhook.
pub struct SlackWebhook {
    http: Client,
}

impl SlackWebhook {
    pub fn new(timeout: Duration) -> Result<Self, SyncError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Delivery(format!("build http client: {e}")))?;
        Ok(Self { http })
    }
}

impl Notifier for SlackWebhook {
    fn send(&self, payload: &NotificationPayload, webhook_url: &str) -> Result<(), SyncError> {
        self.http
            .post(webhook_url)
            .json(payload)
            .send()
            .map_err(|e| SyncError::Delivery(e.to_string()))?
            .error_for_status()
            .map_err(|e| SyncError::Delivery(e.to_string()))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "slack"
    }
}
