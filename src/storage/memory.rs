//! Process-local marketplace store
//!
//! Everything lives in memory for the lifetime of one process and is lost on
//! restart. Each `MemoryStore` is independent; nothing is shared between
//! instances.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::storage::models::{
    NewOrder, NewUser, Order, OrderResponse, OrderStatus, PlatformStats, Review, Role, User,
};
use crate::storage::session::SessionStore;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<i64, User>,
    orders: BTreeMap<u64, Order>,
    responses: BTreeMap<u64, Vec<OrderResponse>>,
    reviews: Vec<Review>,
    last_order_id: u64,
}

/// Users, orders, responses and reviews plus the conversation sessions.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    sessions: SessionStore,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    // ---- users ----

    pub async fn get_user(&self, user_id: i64) -> Option<User> {
        self.tables.read().await.users.get(&user_id).cloned()
    }

    /// Inserts or replaces the user record.
    pub async fn create_user(&self, new_user: NewUser) -> User {
        let user = User {
            id: new_user.id,
            first_name: new_user.first_name,
            username: new_user.username,
            language: new_user.language,
            role: new_user.role,
            profile: new_user.profile,
            created_at: Utc::now(),
        };
        let mut tables = self.tables.write().await;
        if tables.users.insert(user.id, user.clone()).is_some() {
            log::info!("User {} re-registered, record replaced", user.id);
        } else {
            log::info!("User {} registered as {}", user.id, user.role);
        }
        user
    }

    pub async fn users_by_role(&self, role: Role) -> Vec<User> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().filter(|u| u.role == role).cloned().collect();
        users.sort_by_key(|u| u.id);
        users
    }

    // ---- orders ----

    pub async fn create_order(&self, new_order: NewOrder) -> Order {
        let mut tables = self.tables.write().await;
        tables.last_order_id += 1;
        let order = Order {
            id: tables.last_order_id,
            client_id: new_order.client_id,
            title: new_order.title,
            description: new_order.description,
            category: new_order.category,
            budget: new_order.budget,
            deadline_days: new_order.deadline_days,
            contact: new_order.contact,
            status: OrderStatus::Active,
            freelancer_id: None,
            created_at: Utc::now(),
            accepted_at: None,
            completed_at: None,
        };
        tables.orders.insert(order.id, order.clone());
        log::info!("Order #{} created by client {}", order.id, order.client_id);
        order
    }

    pub async fn get_order(&self, order_id: u64) -> Option<Order> {
        self.tables.read().await.orders.get(&order_id).cloned()
    }

    /// Applies `update` under the write lock when `allowed` accepts the
    /// current state. Returns `None` for unknown orders and refused states.
    async fn update_order<P, F>(&self, order_id: u64, allowed: P, update: F) -> Option<Order>
    where
        P: FnOnce(&Order) -> bool,
        F: FnOnce(&mut Order),
    {
        let mut tables = self.tables.write().await;
        let order = tables.orders.get_mut(&order_id)?;
        if !allowed(order) {
            log::debug!("Order #{} is {}, transition refused", order.id, order.status);
            return None;
        }
        update(order);
        Some(order.clone())
    }

    /// Assigns a freelancer and moves an `active` order to `in_progress`.
    pub async fn accept_freelancer(&self, order_id: u64, freelancer_id: i64) -> Option<Order> {
        self.update_order(
            order_id,
            |order| order.status == OrderStatus::Active,
            |order| {
                order.status = OrderStatus::InProgress;
                order.freelancer_id = Some(freelancer_id);
                order.accepted_at = Some(Utc::now());
            },
        )
        .await
    }

    /// Completes any order that is not completed yet.
    pub async fn complete_order(&self, order_id: u64) -> Option<Order> {
        self.update_order(
            order_id,
            |order| order.status != OrderStatus::Completed,
            |order| {
                order.status = OrderStatus::Completed;
                order.completed_at = Some(Utc::now());
            },
        )
        .await
    }

    /// Orders created by `client_id`, oldest first.
    pub async fn orders_by_client(&self, client_id: i64) -> Vec<Order> {
        let tables = self.tables.read().await;
        tables.orders.values().filter(|o| o.client_id == client_id).cloned().collect()
    }

    pub async fn active_orders(&self) -> Vec<Order> {
        let tables = self.tables.read().await;
        tables
            .orders
            .values()
            .filter(|o| o.status == OrderStatus::Active)
            .cloned()
            .collect()
    }

    /// Active orders a freelancer can still respond to: not their own and
    /// not already responded to.
    pub async fn active_orders_for_freelancer(&self, freelancer_id: i64) -> Vec<Order> {
        let tables = self.tables.read().await;
        tables
            .orders
            .values()
            .filter(|o| o.status == OrderStatus::Active && o.client_id != freelancer_id)
            .filter(|o| {
                !tables
                    .responses
                    .get(&o.id)
                    .is_some_and(|rs| rs.iter().any(|r| r.freelancer_id == freelancer_id))
            })
            .cloned()
            .collect()
    }

    // ---- responses ----

    /// Records a response. Returns `false` if this freelancer already responded
    /// or the order does not exist.
    pub async fn add_response(&self, order_id: u64, freelancer_id: i64, message: String) -> bool {
        let mut tables = self.tables.write().await;
        if !tables.orders.contains_key(&order_id) {
            return false;
        }
        let responses = tables.responses.entry(order_id).or_default();
        if responses.iter().any(|r| r.freelancer_id == freelancer_id) {
            return false;
        }
        responses.push(OrderResponse {
            order_id,
            freelancer_id,
            message,
            created_at: Utc::now(),
        });
        log::info!("Freelancer {} responded to order #{}", freelancer_id, order_id);
        true
    }

    pub async fn responses_for_order(&self, order_id: u64) -> Vec<OrderResponse> {
        self.tables
            .read()
            .await
            .responses
            .get(&order_id)
            .cloned()
            .unwrap_or_default()
    }

    /// A freelancer's responses joined with their orders, by order id.
    pub async fn responses_by_freelancer(&self, freelancer_id: i64) -> Vec<(OrderResponse, Order)> {
        let tables = self.tables.read().await;
        tables
            .responses
            .iter()
            .flat_map(|(order_id, responses)| {
                responses
                    .iter()
                    .filter(|r| r.freelancer_id == freelancer_id)
                    .filter_map(|r| tables.orders.get(order_id).map(|o| (r.clone(), o.clone())))
            })
            .collect()
    }

    // ---- reviews ----

    /// Records a review. Returns `false` for a repeated (order, reviewer, reviewed)
    /// triple or an out-of-range rating.
    pub async fn add_review(
        &self,
        order_id: u64,
        reviewer_id: i64,
        reviewed_id: i64,
        rating: u8,
        comment: String,
    ) -> bool {
        if !(1..=5).contains(&rating) {
            return false;
        }
        let mut tables = self.tables.write().await;
        let duplicate = tables
            .reviews
            .iter()
            .any(|r| r.order_id == order_id && r.reviewer_id == reviewer_id && r.reviewed_id == reviewed_id);
        if duplicate {
            return false;
        }
        tables.reviews.push(Review {
            order_id,
            reviewer_id,
            reviewed_id,
            rating,
            comment,
            created_at: Utc::now(),
        });
        log::info!("Review {}/5 for user {} on order #{}", rating, reviewed_id, order_id);
        true
    }

    /// Reviews about `user_id`, newest first.
    pub async fn reviews_for_user(&self, user_id: i64) -> Vec<Review> {
        let tables = self.tables.read().await;
        let mut reviews: Vec<Review> = tables.reviews.iter().filter(|r| r.reviewed_id == user_id).cloned().collect();
        reviews.reverse();
        reviews
    }

    /// Mean rating, 0.0 when there are no reviews.
    pub async fn average_rating(&self, user_id: i64) -> f64 {
        let tables = self.tables.read().await;
        let (sum, count) = tables
            .reviews
            .iter()
            .filter(|r| r.reviewed_id == user_id)
            .fold((0u32, 0u32), |(sum, count), r| (sum + u32::from(r.rating), count + 1));
        if count == 0 {
            0.0
        } else {
            f64::from(sum) / f64::from(count)
        }
    }

    pub async fn stats(&self) -> PlatformStats {
        let tables = self.tables.read().await;
        PlatformStats {
            total_users: tables.users.len(),
            freelancers: tables.users.values().filter(|u| u.role == Role::Freelancer).count(),
            clients: tables.users.values().filter(|u| u.role == Role::Client).count(),
            total_orders: tables.orders.len(),
            active_orders: tables.orders.values().filter(|o| o.status == OrderStatus::Active).count(),
            completed_orders: tables
                .orders
                .values()
                .filter(|o| o.status == OrderStatus::Completed)
                .count(),
            total_reviews: tables.reviews.len(),
        }
    }
}
