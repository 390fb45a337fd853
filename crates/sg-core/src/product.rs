//! Product data models.

use serde::{Deserialize, Serialize};

/// Price as delivered by the search API.
///
/// The amount is kept as the decimal text the API sent so no precision is
/// lost on the way to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount: String,
    pub currency: String,
}

/// A product summary from a search result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub price: Price,
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    /// Render the product as a chat message, prefixed by its ordinal.
    pub fn render(&self, ordinal: usize) -> String {
        format!(
            "#{}\nTitle: {}\nPrice: {} {}\nLink: {}",
            ordinal, self.title, self.price.amount, self.price.currency, self.url
        )
    }
}
