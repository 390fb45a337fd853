//! Telegram bot implementation

use std::sync::Arc;

use teloxide::{dispatching::UpdateFilterExt, prelude::*, types::BotCommand};
use tracing::{info, warn};

use sg_core::{Command, Dispatcher as CommandDispatcher};

use crate::commands::{BotState, handle_message};
use crate::error::{Result, TelegramError};

/// Command list shown in the Telegram client menu
fn menu_commands() -> Vec<BotCommand> {
    Command::menu()
        .iter()
        .map(|(name, description)| BotCommand::new(*name, *description))
        .collect()
}

/// Telegram bot wrapper
pub struct TelegramBot {
    bot: Bot,
    state: Arc<BotState>,
}

impl TelegramBot {
    /// Create a new Telegram bot
    pub fn new(token: &str, dispatcher: CommandDispatcher) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(TelegramError::TokenNotSet);
        }

        let bot = Bot::new(token);
        let state = Arc::new(BotState { dispatcher });

        Ok(Self { bot, state })
    }

    /// Start long polling until Ctrl+C
    pub async fn start(self) -> Result<()> {
        info!("Starting Telegram bot...");

        if let Err(e) = self.bot.set_my_commands(menu_commands()).await {
            warn!("Failed to register command menu: {}", e);
        }

        let handler = Update::filter_message().endpoint(
            |bot: Bot, msg: Message, state: Arc<BotState>| async move {
                handle_message(bot, msg, state).await
            },
        );

        Dispatcher::builder(self.bot, handler)
            .dependencies(dptree::deps![self.state])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
