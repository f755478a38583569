use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    models::{customer::CustomerInfo, retry::RetryConfig},
    utils::retry_with_backoff,
};

const USER_AGENT: &str = concat!("xentral-relay/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
struct CustomerEndpoint {
    url_template: String,
    api_token: String,
}

/// Fetches supplementary customer data from the Xentral API.
///
/// Lookup is best-effort: a missing id, missing configuration, or any failure
/// after retries degrades to `None` and never propagates to the caller.
pub struct CustomerClient {
    http_client: Client,
    endpoint: Option<CustomerEndpoint>,
    retry_config: RetryConfig,
}

impl CustomerClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        let endpoint = match (
            config.xentral_customer_url_template.clone(),
            config.xentral_api_token.clone(),
        ) {
            (Some(url_template), Some(api_token)) => {
                info!("Xentral customer API client initialized");
                Some(CustomerEndpoint {
                    url_template,
                    api_token,
                })
            }
            _ => {
                warn!("Missing Xentral API configuration, customer lookup disabled");
                None
            }
        };

        Ok(Self {
            http_client,
            endpoint,
            retry_config: config.retry_config(),
        })
    }

    /// Resolves a customer by id, or `None` when the id is absent, the API is
    /// unconfigured, or the lookup fails after retries.
    pub async fn lookup(&self, customer_id: Option<&str>) -> Option<CustomerInfo> {
        let customer_id = match customer_id {
            Some(id) if !id.is_empty() => id,
            _ => return None,
        };

        let Some(endpoint) = &self.endpoint else {
            warn!(customer_id, "Xentral API not configured, skipping customer lookup");
            return None;
        };

        let url = endpoint.url_template.replace("{id}", customer_id);

        let result = retry_with_backoff(&self.retry_config, || {
            self.fetch_once(&url, &endpoint.api_token, customer_id)
        })
        .await;

        match result {
            Ok(info) => Some(info),
            Err(e) => {
                error!(customer_id, error = %e, "Customer lookup failed");
                None
            }
        }
    }

    async fn fetch_once(
        &self,
        url: &str,
        api_token: &str,
        customer_id: &str,
    ) -> Result<CustomerInfo, Error> {
        debug!(customer_id, "Fetching customer data from Xentral");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(api_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let response_body = response.text().await.unwrap_or_default();
            error!(
                customer_id,
                status = status.as_u16(),
                status_text = status.canonical_reason().unwrap_or("unknown"),
                response = %response_body,
                "Xentral API request failed"
            );
            return Err(anyhow!(
                "Xentral API error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown")
            ));
        }

        let payload: Value = response.json().await?;
        info!(customer_id, "Successfully fetched customer data");

        // The Xentral API wraps records in a {data: {...}} envelope.
        let record = payload
            .get("data")
            .filter(|data| !data.is_null())
            .unwrap_or(&payload);

        Ok(CustomerInfo::from_record(record))
    }
}
