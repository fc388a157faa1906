//! Marketplace records kept by the in-memory store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::i18n::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Freelancer,
    Client,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub skills: String,
    pub description: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub username: Option<String>,
    pub language: Lang,
    pub role: Role,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

/// Fields a registration supplies; the store fills in the timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: i64,
    pub first_name: String,
    pub username: Option<String>,
    pub language: Lang,
    pub role: Role,
    pub profile: Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Active,
    InProgress,
    Completed,
}

impl OrderStatus {
    pub fn emoji(self) -> &'static str {
        match self {
            OrderStatus::Active => "🟢",
            OrderStatus::InProgress => "🟡",
            OrderStatus::Completed => "✅",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub client_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub budget: f64,
    pub deadline_days: u32,
    pub contact: String,
    pub status: OrderStatus,
    pub freelancer_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Client or assigned freelancer.
    pub fn is_participant(&self, user_id: i64) -> bool {
        self.client_id == user_id || self.freelancer_id == Some(user_id)
    }
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub client_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub budget: f64,
    pub deadline_days: u32,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: u64,
    pub freelancer_id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub order_id: u64,
    pub reviewer_id: i64,
    pub reviewed_id: i64,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformStats {
    pub total_users: usize,
    pub freelancers: usize,
    pub clients: usize,
    pub total_orders: usize,
    pub active_orders: usize,
    pub completed_orders: usize,
    pub total_reviews: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_and_status_wire_names() {
        assert_eq!(Role::Freelancer.as_ref(), "freelancer");
        assert_eq!("client".parse::<Role>(), Ok(Role::Client));
        assert_eq!(OrderStatus::InProgress.to_string(), "in_progress");
        assert_eq!(OrderStatus::Active.emoji(), "🟢");
        assert_eq!(OrderStatus::Completed.emoji(), "✅");
    }
}
