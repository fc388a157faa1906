//! Test fixtures: configuration, handler dependencies and update payloads

#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use freelancetm::core::rate_limiter::RateLimiter;
use freelancetm::core::{create_router, BotConfig, WebState};
use freelancetm::i18n::Lang;
use freelancetm::storage::{MemoryStore, NewOrder, NewUser, Order, Profile, Role, User};
use freelancetm::telegram::{handle_update, HandlerDeps, Outbox, Reply, Update};

use super::RecordingApi;

pub const TOKEN: &str = "123456:TEST-TOKEN";
pub const ADMIN_ID: i64 = 1000;

static NEXT_UPDATE_ID: AtomicI64 = AtomicI64::new(1);

pub fn test_config() -> BotConfig {
    BotConfig {
        bot_token: Some(TOKEN.to_string()),
        admin_ids: vec![ADMIN_ID],
        ..BotConfig::default()
    }
}

/// Complete handler environment around a fresh store and a recording API.
pub struct TestEnvironment {
    pub config: Arc<BotConfig>,
    pub store: Arc<MemoryStore>,
    pub api: Arc<RecordingApi>,
    pub deps: HandlerDeps,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self::with(test_config(), RecordingApi::new(), RateLimiter::new())
    }

    pub fn with(config: BotConfig, api: RecordingApi, rate_limiter: RateLimiter) -> Self {
        let config = Arc::new(config);
        let store = Arc::new(MemoryStore::new());
        let api = Arc::new(api);
        let deps = HandlerDeps::new(Arc::clone(&store), api.clone(), Arc::clone(&config), rate_limiter);
        Self {
            config,
            store,
            api,
            deps,
        }
    }

    pub fn state(&self) -> WebState {
        WebState::new(Arc::clone(&self.config), Some(self.deps.clone()))
    }

    pub fn router(&self) -> axum::Router {
        create_router(self.state())
    }

    /// Runs one update through the handlers.
    pub async fn send(&self, update: Value) -> Outbox {
        let update: Update = serde_json::from_value(update).unwrap();
        handle_update(&self.deps, update).await.unwrap()
    }

    pub async fn text(&self, user_id: i64, text: &str) -> Outbox {
        self.send(message_json(user_id, text)).await
    }

    pub async fn press(&self, user_id: i64, data: &str) -> Outbox {
        self.send(callback_json(user_id, data, Some(50))).await
    }

    pub async fn add_user(&self, id: i64, role: Role, lang: Lang) -> User {
        self.store
            .create_user(NewUser {
                id,
                first_name: format!("User{}", id),
                username: None,
                language: lang,
                role,
                profile: Profile {
                    name: format!("Name{}", id),
                    skills: "Rust".to_string(),
                    description: "About me".to_string(),
                    contact: format!("@user{}", id),
                },
            })
            .await
    }

    pub async fn add_order(&self, client_id: i64) -> Order {
        self.store
            .create_order(NewOrder {
                client_id,
                title: "Landing page".to_string(),
                description: "One page site".to_string(),
                category: "web_development".to_string(),
                budget: 500.0,
                deadline_days: 7,
                contact: "@client".to_string(),
            })
            .await
    }
}

fn next_update_id() -> i64 {
    NEXT_UPDATE_ID.fetch_add(1, Ordering::Relaxed)
}

fn user_json(user_id: i64) -> Value {
    json!({"id": user_id, "is_bot": false, "first_name": format!("Tg{}", user_id), "language_code": "ru"})
}

pub fn message_json(user_id: i64, text: &str) -> Value {
    json!({
        "update_id": next_update_id(),
        "message": {
            "message_id": 10,
            "date": 1700000000,
            "chat": {"id": user_id, "type": "private"},
            "from": user_json(user_id),
            "text": text
        }
    })
}

pub fn callback_json(user_id: i64, data: &str, message_id: Option<i32>) -> Value {
    let mut query = json!({
        "id": format!("cb-{}", next_update_id()),
        "chat_instance": "instance",
        "from": user_json(user_id),
        "data": data
    });
    if let Some(message_id) = message_id {
        query["message"] = json!({
            "message_id": message_id,
            "date": 1700000000,
            "chat": {"id": user_id, "type": "private"},
            "from": {"id": 1, "is_bot": true, "first_name": "FreelanceTM"},
            "text": "FreelanceTM"
        });
    }
    json!({"update_id": next_update_id(), "callback_query": query})
}

/// Texts of the message-like replies, in order.
pub fn texts(outbox: &Outbox) -> Vec<String> {
    outbox
        .replies()
        .iter()
        .filter(|r| !matches!(r, Reply::AnswerCallbackQuery { .. }))
        .filter_map(|r| r.text().map(str::to_string))
        .collect()
}

/// Text of the callback answer, if one carries text.
pub fn answer_text(outbox: &Outbox) -> Option<String> {
    outbox.replies().iter().find_map(|r| match r {
        Reply::AnswerCallbackQuery { text, .. } => text.clone(),
        _ => None,
    })
}
