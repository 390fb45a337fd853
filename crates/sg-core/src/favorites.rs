//! Favorites management
//!
//! Indices typed by the user are 1-based. `add_favorite` resolves them
//! against the page last shown (position within that page, not the global
//! ordinal); `remove_favorite` resolves them against the favorites list.

use tracing::info;

use crate::error::ShopError;
use crate::product::Product;
use crate::session::Session;

/// Parse a user-typed 1-based index.
///
/// Anything that is not a positive integer fails with
/// [`ShopError::IndexOutOfRange`].
pub fn parse_index(text: &str) -> Result<usize, ShopError> {
    match text.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ShopError::IndexOutOfRange),
    }
}

/// Copy a product of the last displayed page into the favorites.
pub fn add_favorite(session: &mut Session, index: usize) -> Result<Product, ShopError> {
    let product = index
        .checked_sub(1)
        .and_then(|i| session.last_page.get(i))
        .cloned()
        .ok_or(ShopError::IndexOutOfRange)?;

    session.favorites.push(product.clone());
    session.touch();

    info!("User {} added favorite: {}", session.user_id, product.title);
    Ok(product)
}

/// Favorites in insertion order.
pub fn list_favorites(session: &Session) -> &[Product] {
    &session.favorites
}

/// Remove exactly one favorite at a 1-based position.
pub fn remove_favorite(session: &mut Session, index: usize) -> Result<Product, ShopError> {
    let position = index
        .checked_sub(1)
        .filter(|&i| i < session.favorites.len())
        .ok_or(ShopError::IndexOutOfRange)?;

    let removed = session.favorites.remove(position);
    session.touch();

    info!("User {} removed favorite: {}", session.user_id, removed.title);
    Ok(removed)
}
