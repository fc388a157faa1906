use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::core::config;

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(3600);

#[derive(Debug, Default)]
struct UserWindow {
    minute: VecDeque<Instant>,
    hour: VecDeque<Instant>,
    blocked_until: Option<Instant>,
}

impl UserWindow {
    fn prune(&mut self, now: Instant) {
        while self.minute.front().is_some_and(|t| now.duration_since(*t) >= MINUTE) {
            self.minute.pop_front();
        }
        while self.hour.front().is_some_and(|t| now.duration_since(*t) >= HOUR) {
            self.hour.pop_front();
        }
        if self.blocked_until.is_some_and(|until| now >= until) {
            self.blocked_until = None;
        }
    }

    fn is_idle(&self) -> bool {
        self.hour.is_empty() && self.blocked_until.is_none()
    }
}

/// Sliding-window rate limiter keyed by Telegram user id.
///
/// A user may make `per_minute` requests per minute and `per_hour` per hour.
/// Exceeding either limit blocks the user for `block_duration`.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<i64, UserWindow>>>,
    per_minute: usize,
    per_hour: usize,
    block_duration: Duration,
}

impl RateLimiter {
    /// Creates a limiter with the production limits (20/min, 100/hour, 1h block).
    pub fn new() -> Self {
        Self::with_limits(
            config::rate_limit::PER_MINUTE,
            config::rate_limit::PER_HOUR,
            config::rate_limit::block_duration(),
        )
    }

    pub fn with_limits(per_minute: usize, per_hour: usize, block_duration: Duration) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            per_minute,
            per_hour,
            block_duration,
        }
    }

    /// Records a request and returns `true` if it is allowed.
    pub async fn check(&self, user_id: i64) -> bool {
        self.check_at(user_id, Instant::now()).await
    }

    /// Same as [`check`](Self::check) with an explicit clock reading.
    pub async fn check_at(&self, user_id: i64, now: Instant) -> bool {
        let mut windows = self.windows.lock().await;

        windows.retain(|_, window| {
            window.prune(now);
            !window.is_idle()
        });

        let window = windows.entry(user_id).or_default();
        if window.blocked_until.is_some() {
            return false;
        }

        if window.minute.len() >= self.per_minute || window.hour.len() >= self.per_hour {
            window.blocked_until = Some(now + self.block_duration);
            log::warn!("User {} exceeded rate limit, blocked for {:?}", user_id, self.block_duration);
            return false;
        }

        window.minute.push_back(now);
        window.hour.push_back(now);
        true
    }

    /// Returns the remaining block time for a user, if blocked.
    pub async fn remaining_block(&self, user_id: i64) -> Option<Duration> {
        let windows = self.windows.lock().await;
        let until = windows.get(&user_id)?.blocked_until?;
        let now = Instant::now();
        (now < until).then(|| until - now)
    }

    /// Lifts any block and forgets the user's history.
    pub async fn reset(&self, user_id: i64) {
        let mut windows = self.windows.lock().await;
        windows.remove(&user_id);
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_minute_limit_then_blocks() {
        let limiter = RateLimiter::with_limits(3, 100, Duration::from_secs(3600));
        let start = Instant::now();

        for i in 0..3 {
            assert!(limiter.check_at(1, start + Duration::from_secs(i)).await);
        }
        assert!(!limiter.check_at(1, start + Duration::from_secs(4)).await);

        // Still blocked once the minute window has passed
        assert!(!limiter.check_at(1, start + Duration::from_secs(120)).await);
        // Other users are unaffected
        assert!(limiter.check_at(2, start + Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn block_expires() {
        let limiter = RateLimiter::with_limits(1, 100, Duration::from_secs(10));
        let start = Instant::now();

        assert!(limiter.check_at(7, start).await);
        assert!(!limiter.check_at(7, start + Duration::from_secs(1)).await);
        assert!(limiter.check_at(7, start + Duration::from_secs(70)).await);
    }

    #[tokio::test]
    async fn hourly_limit_applies_across_minutes() {
        let limiter = RateLimiter::with_limits(100, 5, Duration::from_secs(3600));
        let start = Instant::now();

        for i in 0..5 {
            assert!(limiter.check_at(3, start + Duration::from_secs(i * 61)).await);
        }
        assert!(!limiter.check_at(3, start + Duration::from_secs(400)).await);
    }

    #[tokio::test]
    async fn reset_lifts_block() {
        let limiter = RateLimiter::with_limits(1, 100, Duration::from_secs(3600));
        assert!(limiter.check(9).await);
        assert!(!limiter.check(9).await);
        assert!(limiter.remaining_block(9).await.is_some());

        limiter.reset(9).await;
        assert!(limiter.check(9).await);
    }
}
