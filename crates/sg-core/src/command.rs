//! Bot command parsing

/// Commands understood by the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    /// Search text, possibly empty
    Search(String),
    Next,
    Back,
    /// Raw index argument, validated later
    AddFavorite(String),
    Favourites,
    /// Raw index argument, validated later
    Remove(String),
    Unknown,
}

/// Command names with their menu descriptions
const MENU: &[(&str, &str)] = &[
    ("start", "Start using the bot"),
    ("help", "Show the available commands"),
    ("search", "Search products: /search <keyword>"),
    ("next", "Show the next results of the current search"),
    ("back", "Show the previous results of the current search"),
    ("addfavorite", "Add a product to favorites: /addfavorite <number>"),
    ("favourites", "Show your favorite products"),
    ("remove", "Remove a favorite: /remove <number>"),
];

impl Command {
    /// Parse a chat message.
    ///
    /// A `@botname` suffix on the command word is ignored so commands work
    /// in group chats.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let Some(rest) = text.strip_prefix('/') else {
            return Self::Unknown;
        };

        let (word, args) = match rest.split_once(char::is_whitespace) {
            Some((word, args)) => (word, args.trim()),
            None => (rest, ""),
        };
        let name = word.split('@').next().unwrap_or(word);

        match (name, args.is_empty()) {
            ("start", true) => Self::Start,
            ("help", true) => Self::Help,
            ("search", _) => Self::Search(args.to_string()),
            ("next", true) => Self::Next,
            ("back", true) => Self::Back,
            ("addfavorite", _) => Self::AddFavorite(args.to_string()),
            ("favourites", true) => Self::Favourites,
            ("remove", _) => Self::Remove(args.to_string()),
            _ => Self::Unknown,
        }
    }

    /// `(name, description)` pairs for command menus and completion
    pub fn menu() -> &'static [(&'static str, &'static str)] {
        MENU
    }
}
