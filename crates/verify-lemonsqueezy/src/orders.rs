//! # LemonSqueezy Orders
//!
//! Order lookup against `GET /v1/orders/{id}`.

use crate::config::{LemonSqueezyConfig, JSON_API_MEDIA_TYPE};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, instrument, warn};
use verify_core::{OrderId, OrderLookup, OrderRecord, VerifyError, VerifyResult};

/// LemonSqueezy order lookup
pub struct LemonSqueezyOrderLookup {
    config: LemonSqueezyConfig,
    client: Client,
}

impl LemonSqueezyOrderLookup {
    /// Create a new lookup with its own HTTP client
    pub fn new(config: LemonSqueezyConfig) -> VerifyResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                VerifyError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        // Fail at startup rather than on the first request.
        order_url(&config.api_base_url, "0")?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> VerifyResult<Self> {
        let config = LemonSqueezyConfig::from_env()?;
        Self::new(config)
    }

    /// Create from an explicit variable source
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> VerifyResult<Self> {
        Self::new(LemonSqueezyConfig::from_vars(vars)?)
    }

    /// API base URL in use
    pub fn api_base_url(&self) -> &str {
        &self.config.api_base_url
    }
}

#[async_trait]
impl OrderLookup for LemonSqueezyOrderLookup {
    #[instrument(skip(self, order_id), fields(order_id = %order_id))]
    async fn fetch_order(&self, order_id: &OrderId) -> VerifyResult<OrderRecord> {
        let url = order_url(&self.config.api_base_url, order_id.as_str())?;

        debug!("Fetching LemonSqueezy order: {}", url);

        let response = self
            .client
            .get(url)
            .header("Authorization", self.config.auth_header())
            .header("Accept", JSON_API_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| VerifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("LemonSqueezy order lookup rejected: status={}", status);
            return Err(VerifyError::OrderNotFound {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| VerifyError::Network(e.to_string()))?;

        let doc: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
            VerifyError::Serialization(format!("Failed to parse LemonSqueezy response: {}", e))
        })?;

        let record = OrderRecord::from_document(&doc);

        debug!(
            "LemonSqueezy order: id={:?}, status={}",
            record.provider_id, record.status
        );

        Ok(record)
    }

    fn provider_name(&self) -> &'static str {
        "lemonsqueezy"
    }
}

/// Build `{base}/v1/orders/{order_id}` with the ID as one encoded path segment.
fn order_url(base: &str, order_id: &str) -> VerifyResult<Url> {
    let mut url = Url::parse(base).map_err(|e| {
        VerifyError::Configuration(format!("Invalid LemonSqueezy base URL {:?}: {}", base, e))
    })?;

    url.path_segments_mut()
        .map_err(|_| {
            VerifyError::Configuration(format!(
                "LemonSqueezy base URL cannot be a base: {:?}",
                base
            ))
        })?
        .pop_if_empty()
        .extend(["v1", "orders", order_id]);

    Ok(url)
}
