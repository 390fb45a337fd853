//! In-memory catalog used by unit tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::product::{Price, Product};

use super::ProductSearch;

/// Serves fixed catalogs per query and records every call.
pub(crate) struct FakeCatalog {
    catalogs: HashMap<String, Vec<Product>>,
    page_size: usize,
    latency: Option<Duration>,
    failing: AtomicBool,
    calls: Mutex<Vec<(String, usize)>>,
}

impl FakeCatalog {
    pub fn new(page_size: usize) -> Self {
        Self {
            catalogs: HashMap::new(),
            page_size,
            latency: None,
            failing: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Register `count` products named `"{query} {n}"` for `query`.
    pub fn with_products(mut self, query: &str, count: usize) -> Self {
        let products = (1..=count).map(|n| product(&format!("{} {}", query, n))).collect();
        self.catalogs.insert(query.to_string(), products);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every following call fail with a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductSearch for FakeCatalog {
    async fn search(&self, query: &str, offset: usize) -> Result<Vec<Product>> {
        self.calls.lock().unwrap().push((query.to_string(), offset));

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::SearchApi {
                status: 503,
                body: "unavailable".to_string(),
            });
        }

        let page = self
            .catalogs
            .get(query)
            .map(|all| all.iter().skip(offset).take(self.page_size).cloned().collect())
            .unwrap_or_default();

        Ok(page)
    }
}

pub(crate) fn product(title: &str) -> Product {
    Product {
        title: title.to_string(),
        price: Price {
            amount: "10.00".to_string(),
            currency: "EUR".to_string(),
        },
        url: format!("https://www.ebay.it/itm/{}", title.replace(' ', "-")),
        image_url: None,
    }
}
