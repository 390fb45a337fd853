//! eBay Browse API HTTP client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::product::Product;

use super::ProductSearch;
use super::types::{ItemSummary, SearchResponse};

/// Browse API client
#[derive(Clone)]
pub struct EbayClient {
    client: Client,
    access_token: String,
    base_url: String,
    marketplace_id: String,
    currency: String,
    page_size: usize,
}

impl EbayClient {
    /// Create a new client from the search configuration
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            access_token: config.access_token.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            marketplace_id: config.marketplace_id.clone(),
            currency: config.currency.clone(),
            page_size: config.page_size,
        })
    }

    /// Products requested per call
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

#[async_trait]
impl ProductSearch for EbayClient {
    async fn search(&self, query: &str, offset: usize) -> Result<Vec<Product>> {
        let url = format!("{}/item_summary/search", self.base_url);
        let limit = self.page_size.to_string();
        let offset_param = offset.to_string();

        debug!("Searching '{}' at offset {}: {}", query, offset, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("offset", offset_param.as_str()),
                ("currency", self.currency.as_str()),
            ])
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Content-Type", "application/json")
            .header("X-EBAY-C-MARKETPLACE-ID", &self.marketplace_id)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("Search API error: {} - {}", status, body);
            return Err(Error::SearchApi {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)?;

        let products: Vec<Product> = parsed
            .item_summaries
            .unwrap_or_default()
            .into_iter()
            .take(self.page_size)
            .map(ItemSummary::into_product)
            .collect();

        info!(
            "Search '{}' offset={} returned {} products (total={:?})",
            query,
            offset,
            products.len(),
            parsed.total
        );

        Ok(products)
    }
}
