//! Session types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Search, pagination and favorites state of one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Chat/user identifier this session belongs to
    pub user_id: String,
    /// Last search term, absent until the first search
    pub(crate) query: Option<String>,
    /// Pagination cursor, always a multiple of the page size
    pub(crate) offset: usize,
    /// Page most recently shown to the user
    pub(crate) last_page: Vec<Product>,
    /// Favorites in insertion order, duplicates allowed
    pub(crate) favorites: Vec<Product>,
    /// Session creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last committed mutation
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create an empty session for a user
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            query: None,
            offset: 0,
            last_page: Vec::new(),
            favorites: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn last_page(&self) -> &[Product] {
        &self.last_page
    }

    pub fn favorites(&self) -> &[Product] {
        &self.favorites
    }

    /// Replace cursor and page together
    pub(crate) fn commit_page(&mut self, offset: usize, page: Vec<Product>) {
        self.offset = offset;
        self.last_page = page;
        self.touch();
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
