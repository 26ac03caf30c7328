//! Best-effort external notifications.
//!
//! One JSON POST per triggering event (upload, grade, reject), single attempt,
//! strict client timeout, no retry and no delivery confirmation. Callers log
//! a failed publish and carry on; a notification must never fail or roll back
//! the operation that triggered it.

use crate::config;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Notification endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Serialize)]
struct Payload<'a> {
    subject: &'a str,
    message: &'a str,
}

/// Publishes event notifications to a configured webhook endpoint.
///
/// Cheap to clone; the underlying HTTP client is shared.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    /// Builds a notifier from the global configuration. An unset
    /// `NOTIFY_WEBHOOK_URL` disables publishing entirely.
    pub fn from_config() -> Self {
        let webhook_url = config::notify_webhook_url();
        if webhook_url.is_none() {
            tracing::info!("NOTIFY_WEBHOOK_URL not set; notifications disabled");
        }
        Self::new(webhook_url, Duration::from_secs(config::notify_timeout_seconds()))
    }

    pub fn new(webhook_url: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build notification HTTP client");
        Self {
            client,
            webhook_url,
        }
    }

    /// Publishes one notification. Returns the failure to the caller instead
    /// of swallowing it; the caller decides to log and continue.
    pub async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        let Some(url) = &self.webhook_url else {
            tracing::debug!(subject, "notifications disabled; dropping event");
            return Ok(());
        };

        let response = self
            .client
            .post(url)
            .json(&Payload { subject, message })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status()));
        }

        tracing::info!(subject, "notification published");
        Ok(())
    }
}
