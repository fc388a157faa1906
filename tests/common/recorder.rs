//! `TelegramApi` stand-in that records deliveries instead of calling Telegram

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use freelancetm::core::error::{AppError, AppResult};
use freelancetm::telegram::{BotInfo, Reply, TelegramApi};

/// Records every delivered reply and answers membership checks from a set.
pub struct RecordingApi {
    delivered: Mutex<Vec<Reply>>,
    members: Mutex<HashSet<i64>>,
    everyone_is_member: bool,
    fail_membership: bool,
}

impl RecordingApi {
    /// Every user counts as a channel member.
    pub fn new() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            members: Mutex::new(HashSet::new()),
            everyone_is_member: true,
            fail_membership: false,
        }
    }

    /// Only users added with [`add_member`](Self::add_member) are members.
    pub fn without_members() -> Self {
        Self {
            everyone_is_member: false,
            ..Self::new()
        }
    }

    /// Membership checks fail as if the Bot API were unreachable.
    pub fn failing_membership() -> Self {
        Self {
            everyone_is_member: false,
            fail_membership: true,
            ..Self::new()
        }
    }

    pub fn add_member(&self, user_id: i64) {
        self.members.lock().unwrap().insert(user_id);
    }

    pub fn delivered(&self) -> Vec<Reply> {
        self.delivered.lock().unwrap().clone()
    }

    /// Delivered message texts addressed to `chat_id`.
    pub fn texts_to(&self, chat_id: i64) -> Vec<String> {
        self.delivered()
            .iter()
            .filter(|r| r.chat_id() == Some(chat_id))
            .filter_map(|r| r.text().map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl TelegramApi for RecordingApi {
    async fn deliver(&self, reply: &Reply) -> AppResult<()> {
        self.delivered.lock().unwrap().push(reply.clone());
        Ok(())
    }

    async fn is_channel_member(&self, _channel: &str, user_id: i64) -> AppResult<bool> {
        if self.fail_membership {
            return Err(AppError::Internal("membership lookup failed".to_string()));
        }
        Ok(self.everyone_is_member || self.members.lock().unwrap().contains(&user_id))
    }

    async fn bot_info(&self) -> AppResult<BotInfo> {
        Ok(BotInfo {
            bot_id: 123456,
            bot_username: Some("FreelanceTMBot".to_string()),
            bot_name: "FreelanceTM".to_string(),
            webhook_url: Some("https://example.vercel.app/123456:TEST-TOKEN".to_string()),
            has_webhook: true,
            pending_update_count: 0,
        })
    }
}
