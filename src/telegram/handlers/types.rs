//! Handler dependencies and the per-update context

use std::sync::Arc;

use teloxide::types::{InlineKeyboardMarkup, ReplyMarkup};

use crate::core::config::BotConfig;
use crate::core::rate_limiter::RateLimiter;
use crate::i18n::{self, Lang};
use crate::storage::models::User;
use crate::storage::session::Session;
use crate::storage::MemoryStore;
use crate::telegram::api::TelegramApi;
use crate::telegram::reply::{Outbox, Reply};
use crate::telegram::update;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub store: Arc<MemoryStore>,
    pub api: Arc<dyn TelegramApi>,
    pub config: Arc<BotConfig>,
    pub rate_limiter: RateLimiter,
}

impl HandlerDeps {
    pub fn new(store: Arc<MemoryStore>, api: Arc<dyn TelegramApi>, config: Arc<BotConfig>, rate_limiter: RateLimiter) -> Self {
        Self {
            store,
            api,
            config,
            rate_limiter,
        }
    }
}

/// The callback query being answered, if the update is one.
#[derive(Debug, Clone)]
pub struct CallbackInfo {
    pub id: String,
    pub message_id: Option<i32>,
    pub answered: bool,
}

/// Everything a handler needs about the current update, plus the replies it
/// has produced so far.
pub struct Context {
    pub deps: HandlerDeps,
    pub chat_id: i64,
    pub from: update::User,
    /// Registered marketplace user, if any
    pub user: Option<User>,
    pub session: Option<Session>,
    pub lang: Lang,
    pub callback: Option<CallbackInfo>,
    pub outbox: Outbox,
}

impl Context {
    /// Loads the sender's user record and session.
    ///
    /// Language preference: registered user, then open session, then the
    /// Telegram client language, then Russian.
    pub async fn load(deps: HandlerDeps, chat_id: i64, from: update::User) -> Self {
        let user_id = update::user_id(&from);
        let user = deps.store.get_user(user_id).await;
        let session = deps.store.sessions().get(user_id).await;
        let lang = user
            .as_ref()
            .map(|u| u.language)
            .or_else(|| session.as_ref().map(|s| s.lang))
            .or_else(|| from.language_code.as_deref().and_then(Lang::from_telegram_code))
            .unwrap_or_default();

        Self {
            deps,
            chat_id,
            from,
            user,
            session,
            lang,
            callback: None,
            outbox: Outbox::new(),
        }
    }

    pub fn user_id(&self) -> i64 {
        update::user_id(&self.from)
    }

    pub fn is_admin(&self) -> bool {
        self.deps.config.is_admin(self.user_id())
    }

    pub fn t(&self, key: &str) -> String {
        i18n::t(self.lang, key)
    }

    pub fn tr(&self, key: &str, args: &[(&'static str, String)]) -> String {
        i18n::tr(self.lang, key, args)
    }

    pub fn push(&mut self, reply: Reply) {
        self.outbox.push(reply);
    }

    pub fn send(&mut self, text: impl Into<String>) {
        let reply = Reply::message(self.chat_id, text);
        self.push(reply);
    }

    pub fn send_with(&mut self, text: impl Into<String>, markup: impl Into<ReplyMarkup>) {
        let reply = Reply::message(self.chat_id, text).with_markup(markup);
        self.push(reply);
    }

    /// Message to another user, e.g. a notification.
    pub fn notify(&mut self, chat_id: i64, text: impl Into<String>, markup: Option<InlineKeyboardMarkup>) {
        let mut reply = Reply::message(chat_id, text);
        if let Some(markup) = markup {
            reply = reply.with_markup(markup);
        }
        self.push(reply);
    }

    /// Edits the message carrying the pressed button, or sends a new one when
    /// there is nothing to edit.
    pub fn edit_or_send(&mut self, text: impl Into<String>, markup: Option<InlineKeyboardMarkup>) {
        let message_id = self.callback.as_ref().and_then(|c| c.message_id);
        let mut reply = match message_id {
            Some(message_id) => Reply::edit(self.chat_id, message_id, text),
            None => Reply::message(self.chat_id, text),
        };
        if let Some(markup) = markup {
            reply = reply.with_markup(markup);
        }
        self.push(reply);
    }

    /// Answers the callback query, once. Later calls are ignored.
    pub fn answer(&mut self, text: Option<String>) {
        if let Some(callback) = self.callback.as_mut() {
            if !callback.answered {
                callback.answered = true;
                let reply = Reply::answer(callback.id.clone(), text);
                self.outbox.push(reply);
            }
        }
    }

    /// Queues an empty answer ahead of other replies if the handler did not answer.
    pub fn finish_callback(&mut self) {
        if let Some(callback) = self.callback.as_mut() {
            if !callback.answered {
                callback.answered = true;
                self.outbox.prepend(Reply::answer(callback.id.clone(), None));
            }
        }
    }

    pub async fn set_session(&mut self, session: Session) {
        self.deps.store.sessions().set(self.user_id(), session.clone()).await;
        self.session = Some(session);
    }

    pub async fn clear_session(&mut self) {
        self.deps.store.sessions().clear(self.user_id()).await;
        self.session = None;
    }
}
