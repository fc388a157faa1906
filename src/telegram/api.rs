//! Bot API access used outside the webhook response body
//!
//! Handlers never talk to Telegram directly. Follow-up messages, membership
//! checks and metadata lookups go through [`TelegramApi`], which `BotApi`
//! implements on top of `teloxide::Bot` and tests replace with a recorder.

use async_trait::async_trait;
use serde::Serialize;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, MessageId, Recipient};

use crate::core::error::{AppError, AppResult};
use crate::telegram::reply::Reply;

/// Bot identity plus webhook status, as served by `GET /bot_info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotInfo {
    pub bot_id: u64,
    pub bot_username: Option<String>,
    pub bot_name: String,
    pub webhook_url: Option<String>,
    pub has_webhook: bool,
    pub pending_update_count: u32,
}

#[async_trait]
pub trait TelegramApi: Send + Sync {
    /// Executes one reply through the Bot API.
    async fn deliver(&self, reply: &Reply) -> AppResult<()>;

    /// Whether `user_id` is currently a member of `channel` (`@name` or numeric id).
    async fn is_channel_member(&self, channel: &str, user_id: i64) -> AppResult<bool>;

    async fn bot_info(&self) -> AppResult<BotInfo>;
}

/// [`TelegramApi`] backed by a real `teloxide::Bot`.
#[derive(Clone)]
pub struct BotApi {
    bot: Bot,
}

impl BotApi {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn channel_recipient(channel: &str) -> Recipient {
    match channel.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(channel.to_string()),
    }
}

#[async_trait]
impl TelegramApi for BotApi {
    async fn deliver(&self, reply: &Reply) -> AppResult<()> {
        match reply {
            Reply::SendMessage {
                chat_id,
                text,
                parse_mode,
                reply_markup,
            } => {
                let mut request = self.bot.send_message(ChatId(*chat_id), text.clone());
                if let Some(mode) = parse_mode {
                    request = request.parse_mode(*mode);
                }
                if let Some(markup) = reply_markup {
                    request = request.reply_markup(markup.clone());
                }
                request.await?;
            }
            Reply::EditMessageText {
                chat_id,
                message_id,
                text,
                parse_mode,
                reply_markup,
            } => {
                let mut request = self
                    .bot
                    .edit_message_text(ChatId(*chat_id), MessageId(*message_id), text.clone());
                if let Some(mode) = parse_mode {
                    request = request.parse_mode(*mode);
                }
                if let Some(markup) = reply_markup {
                    request = request.reply_markup(markup.clone());
                }
                request.await?;
            }
            Reply::AnswerCallbackQuery {
                callback_query_id,
                text,
            } => {
                let mut request = self
                    .bot
                    .answer_callback_query(CallbackQueryId(callback_query_id.clone()));
                if let Some(text) = text {
                    request = request.text(text.clone());
                }
                request.await?;
            }
        }
        Ok(())
    }

    async fn is_channel_member(&self, channel: &str, user_id: i64) -> AppResult<bool> {
        let user_id = u64::try_from(user_id).map_err(|_| AppError::Validation(format!("bad user id {}", user_id)))?;
        let member = self
            .bot
            .get_chat_member(channel_recipient(channel), UserId(user_id))
            .await?;
        Ok(member.kind.is_present())
    }

    async fn bot_info(&self) -> AppResult<BotInfo> {
        let me = self.bot.get_me().await?;
        let webhook = self.bot.get_webhook_info().await?;
        let webhook_url = webhook.url.map(|url| url.to_string());

        Ok(BotInfo {
            bot_id: me.user.id.0,
            bot_username: me.user.username.clone(),
            bot_name: me.user.first_name.clone(),
            has_webhook: webhook_url.is_some(),
            webhook_url,
            pending_update_count: webhook.pending_update_count,
        })
    }
}
