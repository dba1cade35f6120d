//! data.gov.in client for daily mandi commodity prices

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::MandiConfig;
use crate::error::{AppError, AppResult};

const SERVICE: &str = "Mandi price API";

/// Query sent to the open-data resource, without credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MandiUpstreamQuery {
    pub limit: u32,
    pub offset: u32,
    /// `(field, value)` pairs sent as `filters[field]=value`
    pub filters: Vec<(&'static str, String)>,
}

impl MandiUpstreamQuery {
    /// Query string parameters, in the order they are sent
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("format".to_string(), "json".to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), self.offset.to_string()),
        ];
        params.extend(
            self.filters
                .iter()
                .map(|(field, value)| (format!("filters[{}]", field), value.clone())),
        );
        params
    }

    /// Value of a single filter, if set
    pub fn filter(&self, field: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }
}

/// Record as the open-data API returns it. Extra columns are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMandiRecord {
    pub state: String,
    pub district: String,
    pub market: String,
    pub commodity: String,
    pub variety: String,
    pub arrival_date: String,
    pub min_price: Value,
    pub max_price: Value,
    pub modal_price: Value,
}

#[derive(Debug, Deserialize)]
struct MandiApiResponse {
    #[serde(default)]
    records: Vec<RawMandiRecord>,
}

/// Source of mandi price records
#[async_trait]
pub trait MandiPriceSource: Send + Sync {
    async fn fetch_records(&self, query: &MandiUpstreamQuery) -> AppResult<Vec<RawMandiRecord>>;
}

/// Open Government Data (data.gov.in) client
#[derive(Clone)]
pub struct MandiClient {
    client: Client,
    api_key: Option<String>,
    resource_url: String,
}

impl MandiClient {
    pub fn new(config: &MandiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            resource_url: format!(
                "{}/{}",
                config.base_url.trim_end_matches('/'),
                config.resource_id
            ),
        })
    }
}

#[async_trait]
impl MandiPriceSource for MandiClient {
    async fn fetch_records(&self, query: &MandiUpstreamQuery) -> AppResult<Vec<RawMandiRecord>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("DATA_GOV_API_KEY missing".to_string()))?;

        let params = query.params();
        tracing::info!(url = %self.resource_url, ?params, "Fetching mandi prices");

        let response = self
            .client
            .get(&self.resource_url)
            .query(&[("api-key", api_key)])
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::upstream(SERVICE, e.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(SERVICE, format!("{} - {}", status, body)));
        }

        let data: MandiApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(SERVICE, format!("Failed to parse response: {}", e)))?;

        Ok(data.records)
    }
}
