//! Telegram bot integration and handlers

pub mod api;
pub mod bot;
pub mod format;
pub mod handlers;
pub mod keyboards;
pub mod reply;
pub mod update;

use teloxide::types::InlineKeyboardButton;

// Re-exports for convenience
pub use api::{BotApi, BotInfo, TelegramApi};
pub use bot::{create_bot, Command};
pub use handlers::{handle_update, HandlerDeps};
pub use reply::{Outbox, Reply};
pub use update::Update;

/// Inline button carrying callback data.
pub(crate) fn cb(text: impl Into<String>, data: impl Into<String>) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text.into(), data.into())
}
