//! Per-user conversation state
//!
//! Multi-step flows (registration, order creation, review) keep their draft
//! here between updates. Entries live in a bounded cache and expire when idle.

use moka::future::Cache;
use std::time::Duration;

use crate::core::config;
use crate::i18n::Lang;
use crate::storage::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStep {
    Name,
    Skills,
    Description,
    Contact,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationDraft {
    pub role: Role,
    pub step: RegistrationStep,
    pub name: String,
    pub skills: String,
    pub description: String,
}

impl RegistrationDraft {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            step: RegistrationStep::Name,
            name: String::new(),
            skills: String::new(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStep {
    Title,
    Description,
    Category,
    Budget,
    Deadline,
    Contact,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub step: OrderStep,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub budget: Option<f64>,
    pub deadline_days: Option<u32>,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            step: OrderStep::Title,
            title: String::new(),
            description: String::new(),
            category: None,
            budget: None,
            deadline_days: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewDraft {
    pub reviewed_id: i64,
    pub order_id: u64,
    pub rating: Option<u8>,
}

/// Where a user is in a conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialogue {
    /// Language picked, waiting for the role button
    ChoosingRole,
    Registration(RegistrationDraft),
    Order(OrderDraft),
    Review(ReviewDraft),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub lang: Lang,
    pub dialogue: Dialogue,
}

impl Session {
    pub fn new(lang: Lang, dialogue: Dialogue) -> Self {
        Self { lang, dialogue }
    }
}

/// Bounded, idle-expiring session map keyed by Telegram user id.
#[derive(Clone)]
pub struct SessionStore {
    cache: Cache<i64, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_limits(config::session::MAX_CAPACITY, config::session::idle_ttl())
    }

    pub fn with_limits(max_capacity: u64, idle_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(idle_ttl)
            .build();
        Self { cache }
    }

    pub async fn get(&self, user_id: i64) -> Option<Session> {
        self.cache.get(&user_id).await
    }

    pub async fn set(&self, user_id: i64, session: Session) {
        self.cache.insert(user_id, session).await;
    }

    pub async fn clear(&self, user_id: i64) {
        self.cache.invalidate(&user_id).await;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_clear() {
        let sessions = SessionStore::new();
        assert!(sessions.get(1).await.is_none());

        sessions.set(1, Session::new(Lang::Tm, Dialogue::ChoosingRole)).await;
        let session = sessions.get(1).await.unwrap();
        assert_eq!(session.lang, Lang::Tm);
        assert_eq!(session.dialogue, Dialogue::ChoosingRole);

        sessions.clear(1).await;
        assert!(sessions.get(1).await.is_none());
    }

    #[tokio::test]
    async fn overwrite_replaces_dialogue() {
        let sessions = SessionStore::new();
        sessions.set(5, Session::new(Lang::Ru, Dialogue::ChoosingRole)).await;
        sessions
            .set(
                5,
                Session::new(Lang::Ru, Dialogue::Registration(RegistrationDraft::new(Role::Client))),
            )
            .await;

        match sessions.get(5).await.unwrap().dialogue {
            Dialogue::Registration(draft) => {
                assert_eq!(draft.role, Role::Client);
                assert_eq!(draft.step, RegistrationStep::Name);
            }
            other => panic!("unexpected dialogue: {:?}", other),
        }
    }
}
