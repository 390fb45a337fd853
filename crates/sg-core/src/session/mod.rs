//! Per-user session state
//!
//! A session holds a user's current query, pagination cursor, the page last
//! shown to them and their favorites. The store hands out one lock per user
//! so mutations of the same session never interleave.

mod store;
mod types;

pub use store::{SessionHandle, SessionStore};
pub use types::Session;
