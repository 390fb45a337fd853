//! Command dispatch
//!
//! Routes a chat message to the session operations and renders the outcome
//! as a list of replies. Transport adapters only deliver the replies.

use tracing::{info, warn};

use crate::command::Command;
use crate::error::{Direction, ShopError};
use crate::favorites;
use crate::pagination::{Page, PaginationEngine};
use crate::session::SessionStore;

/// An outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// Image URL to send as a photo
    Photo(String),
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

const GREETING: &str = "Welcome! Send /search followed by a keyword to start browsing products.";

const HELP: &str = "Available commands:
/start - Start using the bot
/search <keyword> - Search products on eBay
/next - Show the next results of the current search
/back - Show the previous results of the current search
/addfavorite <number> - Add a product of the last shown page to your favorites
/favourites - Show your favorite products
/remove <number> - Remove a product from your favorites";

const SEARCH_HINT: &str = "Add a product to your favorites with /addfavorite <number>. \
Use /next to see more results or /back to go back.";

const SEARCH_USAGE: &str = "Tell me what to look for. Usage: /search <keyword>";

const NO_FAVORITES: &str = "You have no favorite products.";

const UNKNOWN: &str = "Unrecognized command. Use /help to see the available commands.";

/// Stateless router over the shared session store
#[derive(Clone)]
pub struct Dispatcher {
    store: SessionStore,
    engine: PaginationEngine,
}

impl Dispatcher {
    pub fn new(store: SessionStore, engine: PaginationEngine) -> Self {
        Self { store, engine }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Handle one inbound message from `user_id`
    pub async fn handle(&self, user_id: &str, text: &str) -> Vec<Reply> {
        let command = Command::parse(text);
        info!("Processing {:?} from user {}", command, user_id);

        match command {
            Command::Start => vec![Reply::text(GREETING)],
            Command::Help => vec![Reply::text(HELP)],
            Command::Search(query) => self.search(user_id, &query).await,
            Command::Next => self.next(user_id).await,
            Command::Back => self.back(user_id).await,
            Command::AddFavorite(arg) => self.add_favorite(user_id, &arg).await,
            Command::Favourites => self.list_favorites(user_id).await,
            Command::Remove(arg) => self.remove_favorite(user_id, &arg).await,
            Command::Unknown => vec![Reply::text(UNKNOWN)],
        }
    }

    async fn search(&self, user_id: &str, query: &str) -> Vec<Reply> {
        if query.is_empty() {
            return vec![Reply::text(SEARCH_USAGE)];
        }

        let handle = self.store.get_or_create(user_id);
        let mut session = handle.lock().await;

        match self.engine.search(&mut session, query).await {
            Ok(page) => {
                let mut replies = render_page(&page);
                replies.push(Reply::text(SEARCH_HINT));
                replies
            }
            Err(e) => vec![Reply::text(describe(&e))],
        }
    }

    async fn next(&self, user_id: &str) -> Vec<Reply> {
        let Some(handle) = self.store.get(user_id) else {
            return vec![Reply::text(describe(&ShopError::NoActiveSearch))];
        };
        let mut session = handle.lock().await;
        paged(self.engine.next(&mut session).await)
    }

    async fn back(&self, user_id: &str) -> Vec<Reply> {
        let Some(handle) = self.store.get(user_id) else {
            return vec![Reply::text(describe(&ShopError::NoActiveSearch))];
        };
        let mut session = handle.lock().await;
        paged(self.engine.back(&mut session).await)
    }

    async fn add_favorite(&self, user_id: &str, arg: &str) -> Vec<Reply> {
        let result = match (favorites::parse_index(arg), self.store.get(user_id)) {
            (Ok(index), Some(handle)) => {
                let mut session = handle.lock().await;
                favorites::add_favorite(&mut session, index)
            }
            (Err(e), _) => Err(e),
            (Ok(_), None) => Err(ShopError::IndexOutOfRange),
        };

        match result {
            Ok(product) => vec![Reply::text(format!(
                "Product \"{}\" added to your favorites.",
                product.title
            ))],
            Err(e) => vec![Reply::text(describe(&e))],
        }
    }

    async fn list_favorites(&self, user_id: &str) -> Vec<Reply> {
        let Some(handle) = self.store.get(user_id) else {
            return vec![Reply::text(NO_FAVORITES)];
        };
        let session = handle.lock().await;

        let items = favorites::list_favorites(&session);
        if items.is_empty() {
            return vec![Reply::text(NO_FAVORITES)];
        }

        items
            .iter()
            .enumerate()
            .map(|(i, product)| Reply::Text(product.render(i + 1)))
            .collect()
    }

    async fn remove_favorite(&self, user_id: &str, arg: &str) -> Vec<Reply> {
        let Some(handle) = self.store.get(user_id) else {
            return vec![Reply::text(NO_FAVORITES)];
        };
        let mut session = handle.lock().await;

        if favorites::list_favorites(&session).is_empty() {
            return vec![Reply::text(NO_FAVORITES)];
        }

        let result = favorites::parse_index(arg)
            .and_then(|index| favorites::remove_favorite(&mut session, index));

        match result {
            Ok(product) => vec![Reply::text(format!(
                "Product \"{}\" removed from your favorites.",
                product.title
            ))],
            Err(e) => vec![Reply::text(describe(&e))],
        }
    }
}

fn paged(result: Result<Page, ShopError>) -> Vec<Reply> {
    match result {
        Ok(page) => render_page(&page),
        Err(e) => vec![Reply::text(describe(&e))],
    }
}

/// One text per product, each followed by its photo when there is one
fn render_page(page: &Page) -> Vec<Reply> {
    let mut replies = Vec::with_capacity(page.products.len() * 2);
    for (ordinal, product) in page.numbered() {
        replies.push(Reply::Text(product.render(ordinal)));
        if let Some(url) = &product.image_url {
            replies.push(Reply::Photo(url.clone()));
        }
    }
    replies
}

/// User-facing message for a failed operation
fn describe(err: &ShopError) -> String {
    match err {
        ShopError::NoActiveSearch => {
            "You have not searched anything yet. Use /search <keyword> to start.".to_string()
        }
        ShopError::EmptyPage(Direction::Search) => "No products found for this search.".to_string(),
        ShopError::EmptyPage(Direction::Next) => {
            "There are no more results for this search.".to_string()
        }
        ShopError::EmptyPage(Direction::Back) => {
            "There are no previous results for this search.".to_string()
        }
        ShopError::AlreadyAtFirstPage => "You are already at the first page of results.".to_string(),
        ShopError::IndexOutOfRange => {
            "Product not found. Make sure you use the right number.".to_string()
        }
        ShopError::Transport { direction, source } => {
            warn!("Search failed ({}): {}", direction, source);
            match direction {
                Direction::Search => "An error occurred while searching.".to_string(),
                Direction::Next => "An error occurred while loading the next results.".to_string(),
                Direction::Back => {
                    "An error occurred while loading the previous results.".to_string()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;
    use crate::search::testing::{FakeCatalog, product};
    use std::sync::Arc;

    fn dispatcher(catalog: FakeCatalog) -> (Dispatcher, Arc<FakeCatalog>) {
        let catalog = Arc::new(catalog);
        let engine = PaginationEngine::new(catalog.clone(), 5);
        (Dispatcher::new(SessionStore::new(), engine), catalog)
    }

    fn texts(replies: &[Reply]) -> Vec<&str> {
        replies
            .iter()
            .filter_map(|r| match r {
                Reply::Text(t) => Some(t.as_str()),
                Reply::Photo(_) => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_static_commands() {
        let (dispatcher, _) = dispatcher(FakeCatalog::new(5));

        assert_eq!(dispatcher.handle("1", "/start").await, vec![Reply::text(GREETING)]);
        assert_eq!(dispatcher.handle("1", "/help").await, vec![Reply::text(HELP)]);
        assert_eq!(dispatcher.handle("1", "hi there").await, vec![Reply::text(UNKNOWN)]);
        assert!(dispatcher.store().is_empty());
    }

    #[test]
    fn test_help_advertises_handled_spelling() {
        assert!(HELP.contains("/addfavorite"));
        assert!(!HELP.contains("/addfavourite"));
    }

    #[tokio::test]
    async fn test_search_renders_numbered_page_and_hint() {
        let (dispatcher, _) = dispatcher(FakeCatalog::new(5).with_products("shoes", 12));

        let replies = dispatcher.handle("1", "/search shoes").await;
        let texts = texts(&replies);

        assert_eq!(texts.len(), 6);
        assert!(texts[0].starts_with("#1\nTitle: shoes 1"));
        assert!(texts[4].starts_with("#5\n"));
        assert_eq!(texts[5], SEARCH_HINT);
    }

    #[test]
    fn test_render_page_sends_photos() {
        let page = Page {
            offset: 5,
            products: vec![
                Product {
                    image_url: Some("https://i.ebayimg.com/1.jpg".to_string()),
                    ..product("lamp")
                },
                product("chair"),
            ],
        };

        let replies = render_page(&page);

        assert_eq!(replies.len(), 3);
        assert!(matches!(&replies[0], Reply::Text(t) if t.starts_with("#6\n")));
        assert_eq!(replies[1], Reply::Photo("https://i.ebayimg.com/1.jpg".to_string()));
        assert!(matches!(&replies[2], Reply::Text(t) if t.starts_with("#7\n")));
    }

    #[tokio::test]
    async fn test_empty_search_usage() {
        let (dispatcher, catalog) = dispatcher(FakeCatalog::new(5));

        let replies = dispatcher.handle("1", "/search   ").await;

        assert_eq!(replies, vec![Reply::text(SEARCH_USAGE)]);
        assert!(catalog.calls().is_empty());
        assert!(dispatcher.store().is_empty());
    }

    #[tokio::test]
    async fn test_no_results_vs_failure() {
        let (dispatcher, catalog) = dispatcher(FakeCatalog::new(5));

        let replies = dispatcher.handle("1", "/search nothing").await;
        assert_eq!(texts(&replies), vec!["No products found for this search."]);

        catalog.set_failing(true);
        let replies = dispatcher.handle("1", "/search nothing").await;
        assert_eq!(texts(&replies), vec!["An error occurred while searching."]);
    }

    #[tokio::test]
    async fn test_navigation_without_search() {
        let (dispatcher, _) = dispatcher(FakeCatalog::new(5));

        for command in ["/next", "/back"] {
            let replies = dispatcher.handle("1", command).await;
            assert!(texts(&replies)[0].starts_with("You have not searched"));
        }
    }

    #[tokio::test]
    async fn test_back_on_first_page() {
        let (dispatcher, _) = dispatcher(FakeCatalog::new(5).with_products("shoes", 12));
        dispatcher.handle("1", "/search shoes").await;

        let replies = dispatcher.handle("1", "/back").await;
        assert_eq!(
            texts(&replies),
            vec!["You are already at the first page of results."]
        );
    }

    #[tokio::test]
    async fn test_next_failure_message() {
        let (dispatcher, catalog) = dispatcher(FakeCatalog::new(5).with_products("shoes", 12));
        dispatcher.handle("1", "/search shoes").await;

        catalog.set_failing(true);
        let replies = dispatcher.handle("1", "/next").await;
        assert_eq!(
            texts(&replies),
            vec!["An error occurred while loading the next results."]
        );
    }

    #[tokio::test]
    async fn test_favorites_scenario() {
        let (dispatcher, _) = dispatcher(FakeCatalog::new(5).with_products("shoes", 5));

        dispatcher.handle("1", "/search shoes").await;

        let replies = dispatcher.handle("1", "/next").await;
        assert_eq!(
            texts(&replies),
            vec!["There are no more results for this search."]
        );

        let replies = dispatcher.handle("1", "/addfavorite 2").await;
        assert_eq!(
            texts(&replies),
            vec!["Product \"shoes 2\" added to your favorites."]
        );

        let replies = dispatcher.handle("1", "/favourites").await;
        let listed = texts(&replies);
        assert_eq!(listed.len(), 1);
        assert!(listed[0].starts_with("#1\nTitle: shoes 2"));

        let replies = dispatcher.handle("1", "/remove 1").await;
        assert_eq!(
            texts(&replies),
            vec!["Product \"shoes 2\" removed from your favorites."]
        );

        let replies = dispatcher.handle("1", "/favourites").await;
        assert_eq!(texts(&replies), vec![NO_FAVORITES]);
    }

    #[tokio::test]
    async fn test_second_page_numbering() {
        let (dispatcher, _) = dispatcher(FakeCatalog::new(5).with_products("shoes", 12));
        dispatcher.handle("1", "/search shoes").await;

        let replies = dispatcher.handle("1", "/next").await;
        let texts = texts(&replies);

        assert_eq!(texts.len(), 5);
        assert!(texts[0].starts_with("#6\n"));
        assert!(texts[4].starts_with("#10\n"));
    }

    #[tokio::test]
    async fn test_invalid_indices() {
        let (dispatcher, _) = dispatcher(FakeCatalog::new(5).with_products("shoes", 3));
        let not_found = "Product not found. Make sure you use the right number.";

        // no session yet
        assert_eq!(texts(&dispatcher.handle("1", "/addfavorite 1").await), vec![not_found]);
        assert_eq!(texts(&dispatcher.handle("1", "/remove 1").await), vec![NO_FAVORITES]);

        dispatcher.handle("1", "/search shoes").await;
        for arg in ["abc", "0", "4", ""] {
            let replies = dispatcher.handle("1", &format!("/addfavorite {}", arg)).await;
            assert_eq!(texts(&replies), vec![not_found], "{arg:?}");
        }

        dispatcher.handle("1", "/addfavorite 3").await;
        assert_eq!(texts(&dispatcher.handle("1", "/remove 2").await), vec![not_found]);
        assert_eq!(texts(&dispatcher.handle("1", "/remove x").await), vec![not_found]);
        assert_eq!(texts(&dispatcher.handle("1", "/favourites").await).len(), 1);
    }

    #[tokio::test]
    async fn test_users_do_not_share_state() {
        let (dispatcher, _) = dispatcher(FakeCatalog::new(5).with_products("shoes", 12));

        dispatcher.handle("alice", "/search shoes").await;
        dispatcher.handle("alice", "/addfavorite 1").await;

        let replies = dispatcher.handle("bob", "/favourites").await;
        assert_eq!(texts(&replies), vec![NO_FAVORITES]);
        let replies = dispatcher.handle("bob", "/next").await;
        assert!(texts(&replies)[0].starts_with("You have not searched"));
    }
}
