//! sg-telegram: Telegram transport for shopgate
//!
//! Feeds Telegram messages into the core command dispatcher and delivers
//! its replies back to the chat.

pub mod bot;
pub mod commands;
pub mod error;

pub use bot::TelegramBot;
pub use commands::BotState;
pub use error::{Result, TelegramError};
