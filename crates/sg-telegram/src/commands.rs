//! Telegram message handling

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::InputFile;
use tracing::{info, warn};

use sg_core::{Dispatcher as CommandDispatcher, Reply};

use crate::error::{Result, TelegramError};

/// Bot state shared across handlers
pub struct BotState {
    pub dispatcher: CommandDispatcher,
}

/// Session key for a chat
pub(crate) fn session_key(chat_id: ChatId) -> String {
    chat_id.to_string()
}

/// Build a photo upload from an image URL
pub(crate) fn photo_input(image_url: &str) -> Result<InputFile> {
    let url = url::Url::parse(image_url).map_err(|e| TelegramError::Url(e.to_string()))?;
    Ok(InputFile::url(url))
}

/// Handle any inbound message
///
/// Non-text messages go through the dispatcher as an empty command and get
/// the "unrecognized command" reply.
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<BotState>) -> Result<()> {
    let chat_id = msg.chat.id;
    let text = msg.text().unwrap_or_default();

    info!("Message from chat {}: {}", chat_id, text);

    let replies = state.dispatcher.handle(&session_key(chat_id), text).await;
    deliver(&bot, chat_id, replies).await
}

/// Send replies in order
async fn deliver(bot: &Bot, chat_id: ChatId, replies: Vec<Reply>) -> Result<()> {
    for reply in replies {
        match reply {
            Reply::Text(text) => {
                bot.send_message(chat_id, text).await?;
            }
            Reply::Photo(image_url) => {
                // a broken image must not hide the remaining results
                let sent = match photo_input(&image_url) {
                    Ok(photo) => bot
                        .send_photo(chat_id, photo)
                        .await
                        .map(|_| ())
                        .map_err(TelegramError::from),
                    Err(e) => Err(e),
                };
                if let Err(e) = sent {
                    warn!("Failed to send photo {} to chat {}: {}", image_url, chat_id, e);
                }
            }
        }
    }
    Ok(())
}
