//! Error types for sg-core

use std::fmt;

use thiserror::Error;

/// Infrastructure error type for sg-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Search API error: {status} - {body}")]
    SearchApi { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for sg-core
pub type Result<T> = std::result::Result<T, Error>;

/// Which navigation step produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// A fresh `/search`
    Search,
    /// `/next`
    Next,
    /// `/back`
    Back,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search => write!(f, "search"),
            Self::Next => write!(f, "next"),
            Self::Back => write!(f, "back"),
        }
    }
}

/// Recoverable outcomes of a shop operation.
///
/// Every variant maps to a user-facing reply at the dispatch boundary;
/// none of them leaves a session partially updated.
#[derive(Error, Debug)]
pub enum ShopError {
    #[error("no active search")]
    NoActiveSearch,

    #[error("empty result page ({0})")]
    EmptyPage(Direction),

    #[error("already at the first page")]
    AlreadyAtFirstPage,

    #[error("product index out of range")]
    IndexOutOfRange,

    #[error("{direction} failed: {source}")]
    Transport {
        direction: Direction,
        #[source]
        source: Error,
    },
}

impl ShopError {
    pub(crate) fn transport(direction: Direction, source: Error) -> Self {
        Self::Transport { direction, source }
    }
}
