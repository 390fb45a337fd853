//! Browse API wire types (only the fields we consume)

use serde::Deserialize;

use crate::product::{Price, Product};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub item_summaries: Option<Vec<ItemSummary>>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemSummary {
    pub title: String,
    pub price: Option<ItemPrice>,
    pub item_web_url: String,
    #[serde(default)]
    pub image: Option<ItemImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemPrice {
    pub value: String,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemImage {
    pub image_url: Option<String>,
}

impl ItemSummary {
    pub fn into_product(self) -> Product {
        // auction-only listings may carry no fixed price
        let price = self
            .price
            .map(|p| Price {
                amount: p.value,
                currency: p.currency,
            })
            .unwrap_or_else(|| Price {
                amount: "-".to_string(),
                currency: String::new(),
            });

        Product {
            title: self.title,
            price,
            url: self.item_web_url,
            image_url: self.image.and_then(|i| i.image_url),
        }
    }
}
