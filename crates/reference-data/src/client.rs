use crate::error::{ReferenceDataError, Result};
use crate::types::{GovernmentScheme, MarketPrice, MarketPriceQuery, PestAlert};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const PEST_ALERTS_PATH: &str = "pest-alerts";
pub const MARKET_PRICES_PATH: &str = "market-prices";
pub const SCHEMES_PATH: &str = "schemes";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceDataConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ReferenceDataConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_ms: 15_000,
        }
    }
}

impl ReferenceDataConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("base_url '{}' is not a valid URL: {e}", self.base_url))?;
        if url.cannot_be_a_base() {
            return Err(format!("base_url '{}' cannot be a base URL", self.base_url));
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be > 0".to_string());
        }
        Ok(())
    }
}

/// Fetches reference lists. Any non-2xx status, empty body, or body that is
/// not a JSON array of the expected records is an error.
pub struct ReferenceDataClient {
    client: Client,
    base_url: Url,
}

impl ReferenceDataClient {
    pub fn new(config: ReferenceDataConfig) -> Result<Self> {
        config.validate().map_err(ReferenceDataError::InvalidConfig)?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ReferenceDataError::InvalidConfig(e.to_string()))?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { client, base_url })
    }

    pub async fn pest_alerts(&self) -> Result<Vec<PestAlert>> {
        self.get_list(PEST_ALERTS_PATH, &[]).await
    }

    pub async fn market_prices(&self, query: &MarketPriceQuery) -> Result<Vec<MarketPrice>> {
        self.get_list(MARKET_PRICES_PATH, &query.params()).await
    }

    pub async fn government_schemes(&self) -> Result<Vec<GovernmentScheme>> {
        self.get_list(SCHEMES_PATH, &[]).await
    }

    fn resource_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ReferenceDataError::InvalidConfig("base_url cannot be a base".into()))?
            .pop_if_empty()
            .push(path);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let url = self.resource_url(path, params)?;
        log::debug!("reference data: GET {url}");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReferenceDataError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ReferenceDataError::EmptyBody(url.to_string()));
        }

        let records: Vec<T> = serde_json::from_slice(&body)?;
        log::debug!("reference data: {} records from {path}", records.len());
        Ok(records)
    }
}
