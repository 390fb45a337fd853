//! sg-core: shopgate core library
//!
//! Product search against the eBay Browse API, per-user paginated search
//! sessions, favorites, and the chat command dispatcher shared by every
//! transport.

pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod favorites;
pub mod pagination;
pub mod product;
pub mod search;
pub mod session;

pub use command::Command;
pub use config::{Config, SearchConfig, TelegramConfig};
pub use dispatch::{Dispatcher, Reply};
pub use error::{Direction, Error, Result, ShopError};
pub use pagination::{Page, PaginationEngine};
pub use product::{Price, Product};
pub use search::{EbayClient, ProductSearch};
pub use session::{Session, SessionHandle, SessionStore};
