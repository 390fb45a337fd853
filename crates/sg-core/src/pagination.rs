//! Search pagination
//!
//! Moves a session's cursor by one page at a time. The remote call always
//! happens before anything is written, so a failed or empty fetch leaves the
//! session exactly as it was.

use std::sync::Arc;

use tracing::debug;

use crate::error::{Direction, ShopError};
use crate::product::Product;
use crate::search::ProductSearch;
use crate::session::Session;

/// A page of results together with the offset it was fetched at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub products: Vec<Product>,
}

impl Page {
    /// Products with their global 1-based ordinals (offset + position).
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Product)> {
        self.products
            .iter()
            .enumerate()
            .map(move |(i, p)| (self.offset + i + 1, p))
    }
}

/// Computes offsets and fetches pages for a session.
#[derive(Clone)]
pub struct PaginationEngine {
    client: Arc<dyn ProductSearch>,
    page_size: usize,
}

impl PaginationEngine {
    pub fn new(client: Arc<dyn ProductSearch>, page_size: usize) -> Self {
        Self { client, page_size }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Start a new search from the first page.
    ///
    /// An empty result still records the query and resets the cursor, but
    /// clears the last page and reports [`ShopError::EmptyPage`].
    pub async fn search(&self, session: &mut Session, query: &str) -> Result<Page, ShopError> {
        let products = self
            .client
            .search(query, 0)
            .await
            .map_err(|e| ShopError::transport(Direction::Search, e))?;

        session.query = Some(query.to_string());
        session.commit_page(0, products.clone());

        if products.is_empty() {
            return Err(ShopError::EmptyPage(Direction::Search));
        }

        Ok(Page {
            offset: 0,
            products,
        })
    }

    /// Advance to the following page.
    pub async fn next(&self, session: &mut Session) -> Result<Page, ShopError> {
        let candidate = session.offset + self.page_size;
        self.navigate(session, candidate, Direction::Next).await
    }

    /// Go back one page. Never calls the remote API from the first page.
    pub async fn back(&self, session: &mut Session) -> Result<Page, ShopError> {
        if session.query.is_none() {
            return Err(ShopError::NoActiveSearch);
        }
        if session.offset == 0 {
            return Err(ShopError::AlreadyAtFirstPage);
        }

        let candidate = session.offset.saturating_sub(self.page_size);
        self.navigate(session, candidate, Direction::Back).await
    }

    async fn navigate(
        &self,
        session: &mut Session,
        candidate: usize,
        direction: Direction,
    ) -> Result<Page, ShopError> {
        let query = session.query.clone().ok_or(ShopError::NoActiveSearch)?;

        debug!(
            "Navigating {} for user {}: offset {} -> {}",
            direction, session.user_id, session.offset, candidate
        );

        let products = self
            .client
            .search(&query, candidate)
            .await
            .map_err(|e| ShopError::transport(direction, e))?;

        if products.is_empty() {
            return Err(ShopError::EmptyPage(direction));
        }

        session.commit_page(candidate, products.clone());

        Ok(Page {
            offset: candidate,
            products,
        })
    }
}
