//! Outgoing Bot API calls produced by handlers
//!
//! A `Reply` serializes to the JSON Telegram accepts as a webhook response
//! body (`{"method": "sendMessage", ...}`), and `BotApi` can also send it
//! directly.

use serde::Serialize;
use teloxide::types::{InlineKeyboardMarkup, ParseMode, ReplyMarkup};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method")]
pub enum Reply {
    #[serde(rename = "sendMessage")]
    SendMessage {
        chat_id: i64,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        parse_mode: Option<ParseMode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reply_markup: Option<ReplyMarkup>,
    },
    #[serde(rename = "editMessageText")]
    EditMessageText {
        chat_id: i64,
        message_id: i32,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        parse_mode: Option<ParseMode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reply_markup: Option<InlineKeyboardMarkup>,
    },
    #[serde(rename = "answerCallbackQuery")]
    AnswerCallbackQuery {
        callback_query_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
}

impl Reply {
    /// HTML-formatted message.
    pub fn message(chat_id: i64, text: impl Into<String>) -> Self {
        Reply::SendMessage {
            chat_id,
            text: text.into(),
            parse_mode: Some(ParseMode::Html),
            reply_markup: None,
        }
    }

    /// HTML-formatted edit of an existing bot message.
    pub fn edit(chat_id: i64, message_id: i32, text: impl Into<String>) -> Self {
        Reply::EditMessageText {
            chat_id,
            message_id,
            text: text.into(),
            parse_mode: Some(ParseMode::Html),
            reply_markup: None,
        }
    }

    pub fn answer(callback_query_id: impl Into<String>, text: Option<String>) -> Self {
        Reply::AnswerCallbackQuery {
            callback_query_id: callback_query_id.into(),
            text,
        }
    }

    /// Attaches a keyboard. Edits only accept inline keyboards; other markup
    /// is dropped for them.
    pub fn with_markup(mut self, markup: impl Into<ReplyMarkup>) -> Self {
        let markup = markup.into();
        match &mut self {
            Reply::SendMessage { reply_markup, .. } => *reply_markup = Some(markup),
            Reply::EditMessageText { reply_markup, .. } => {
                if let ReplyMarkup::InlineKeyboard(keyboard) = markup {
                    *reply_markup = Some(keyboard);
                }
            }
            Reply::AnswerCallbackQuery { .. } => {}
        }
        self
    }

    pub fn chat_id(&self) -> Option<i64> {
        match self {
            Reply::SendMessage { chat_id, .. } | Reply::EditMessageText { chat_id, .. } => Some(*chat_id),
            Reply::AnswerCallbackQuery { .. } => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::SendMessage { text, .. } | Reply::EditMessageText { text, .. } => Some(text),
            Reply::AnswerCallbackQuery { text, .. } => text.as_deref(),
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Reply::SendMessage { .. } => "sendMessage",
            Reply::EditMessageText { .. } => "editMessageText",
            Reply::AnswerCallbackQuery { .. } => "answerCallbackQuery",
        }
    }
}

/// Ordered replies for one update.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Outbox {
    replies: Vec<Reply>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reply: Reply) {
        self.replies.push(reply);
    }

    /// Puts `reply` ahead of everything queued so far.
    pub fn prepend(&mut self, reply: Reply) {
        self.replies.insert(0, reply);
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    /// Splits into the replies to send through the API first and the final
    /// reply that rides in the webhook response body.
    pub fn into_webhook_parts(mut self) -> (Vec<Reply>, Option<Reply>) {
        let last = self.replies.pop();
        (self.replies, last)
    }
}
