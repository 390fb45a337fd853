//! Product search API client
//!
//! [`ProductSearch`] is the seam between session logic and the remote
//! catalog; [`EbayClient`] talks to the eBay Browse API.

mod client;
mod types;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

use crate::error::Result;
use crate::product::Product;

pub use client::EbayClient;

/// A remote catalog that returns one page of products per call.
///
/// An empty vector means there is nothing at `offset`; transport and decoding
/// failures are reported as errors, never as an empty page.
#[async_trait]
pub trait ProductSearch: Send + Sync {
    async fn search(&self, query: &str, offset: usize) -> Result<Vec<Product>>;
}
