use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use reqwest::Client;
use tracing::{info, warn};

use crate::{
    config::Config,
    models::{message::SlackMessage, retry::RetryConfig},
    utils::retry_with_backoff,
};

/// Delivers finished messages to a Slack incoming webhook.
///
/// The destination is resolved once at startup; an unconfigured sink accepts
/// messages and drops them with a warning.
pub struct SlackSink {
    http_client: Client,
    webhook_url: Option<String>,
    retry_config: RetryConfig,
}

impl SlackSink {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        match &config.slack_webhook_url {
            Some(_) => info!("Slack webhook initialized successfully"),
            None => warn!("SLACK_WEBHOOK_URL not set, message delivery disabled"),
        }

        Ok(Self {
            http_client,
            webhook_url: config.slack_webhook_url.clone(),
            retry_config: config.retry_config(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Sends a message with retries. Unconfigured sinks succeed without any
    /// network call; a configured sink propagates the final delivery error.
    pub async fn deliver(&self, message: &SlackMessage) -> Result<(), Error> {
        let Some(webhook_url) = &self.webhook_url else {
            warn!(preview = %message.text, "Slack not configured, skipping message send");
            return Ok(());
        };

        retry_with_backoff(&self.retry_config, || self.post_once(webhook_url, message)).await?;

        info!(preview = %message.text, "Successfully sent message to Slack");
        Ok(())
    }

    async fn post_once(&self, webhook_url: &str, message: &SlackMessage) -> Result<(), Error> {
        let response = self
            .http_client
            .post(webhook_url)
            .json(message)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let response_body = response.text().await.unwrap_or_default();
            Err(anyhow!(
                "Slack webhook returned status {}: {}",
                status.as_u16(),
                response_body
            ))
        }
    }
}
