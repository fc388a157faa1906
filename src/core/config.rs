use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN environment variable
/// Empty or missing means the service runs in degraded mode (no webhook processing)
pub static BOT_TOKEN: Lazy<Option<String>> = Lazy::new(|| non_empty_var("BOT_TOKEN"));

/// Channel users must join before registering
/// Read from REQUIRED_CHANNEL environment variable
/// Accepts `@name`, `name` or a `https://t.me/name` link
/// Default: @FreelanceTM_channel
pub static REQUIRED_CHANNEL: Lazy<String> = Lazy::new(|| {
    non_empty_var("REQUIRED_CHANNEL")
        .map(|raw| normalize_channel(&raw))
        .unwrap_or_else(|| DEFAULT_CHANNEL.to_string())
});

/// Opaque session secret, never logged
pub static SESSION_SECRET: Lazy<Option<String>> = Lazy::new(|| non_empty_var("SESSION_SECRET"));

/// Expected value of the `X-Telegram-Bot-Api-Secret-Token` header
/// Also registered with Telegram by the `set-webhook` subcommand
pub static WEBHOOK_SECRET: Lazy<Option<String>> = Lazy::new(|| non_empty_var("WEBHOOK_SECRET"));

/// HTTP port for the webhook server
/// Read from PORT environment variable
/// Default: 5000
pub static PORT: Lazy<u16> = Lazy::new(|| {
    env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PORT)
});

/// Log level filter
/// Read from LOG_LEVEL environment variable (error, warn, info, debug, trace)
/// Default: info
pub static LOG_LEVEL: Lazy<String> = Lazy::new(|| env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

/// Optional log file path
/// Read from LOG_FILE_PATH environment variable
/// When unset only the terminal logger is installed
pub static LOG_FILE_PATH: Lazy<Option<String>> = Lazy::new(|| non_empty_var("LOG_FILE_PATH"));

/// Custom Bot API server, used by tests and local Bot API deployments
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| non_empty_var("BOT_API_URL"));

pub const DEFAULT_CHANNEL: &str = "@FreelanceTM_channel";
pub const DEFAULT_PORT: u16 = 5000;

/// Rate limiting configuration
pub mod rate_limit {
    use super::Duration;

    /// Requests allowed per user in a sliding minute
    pub const PER_MINUTE: usize = 20;

    /// Requests allowed per user in a sliding hour
    pub const PER_HOUR: usize = 100;

    /// How long a user stays blocked after exceeding a limit
    pub fn block_duration() -> Duration {
        Duration::from_secs(3600)
    }
}

/// Page sizes for list screens
pub mod pagination {
    /// Orders shown in "view orders"
    pub const ORDERS: usize = 10;

    /// Orders shown in "my orders"
    pub const MY_ORDERS: usize = 10;

    /// Responses shown per order in "view responses"
    pub const RESPONSES: usize = 5;

    /// Reviews shown in "reviews"
    pub const REVIEWS: usize = 5;

    /// Responses shown in "my responses"
    pub const MY_RESPONSES: usize = 10;
}

/// Text limits
pub mod text {
    /// Order descriptions are truncated to this many characters in listings
    pub const DESCRIPTION_PREVIEW: usize = 100;

    /// Free-form user input is cut to this many characters
    pub const MAX_INPUT: usize = 1000;

    /// Messages longer than this are treated as spam
    pub const SPAM_LENGTH: usize = 2000;
}

/// Conversation session cache
pub mod session {
    use super::Duration;

    /// Maximum number of concurrent conversations kept in memory
    pub const MAX_CAPACITY: u64 = 10_000;

    /// Conversations idle longer than this are dropped
    pub fn idle_ttl() -> Duration {
        Duration::from_secs(24 * 3600)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Timeout for Bot API requests
    pub fn timeout() -> Duration {
        Duration::from_secs(30)
    }
}

/// Admin configuration
pub mod admin {
    use once_cell::sync::Lazy;
    use std::env;

    pub(crate) fn parse_admin_ids(raw: &str) -> Vec<i64> {
        raw.split([',', ' ', '\n', '\t'])
            .filter_map(|part| part.trim().parse::<i64>().ok())
            .collect()
    }

    /// Admin user IDs (comma-separated)
    /// Read from ADMIN_IDS environment variable
    pub static ADMIN_IDS: Lazy<Vec<i64>> = Lazy::new(|| {
        env::var("ADMIN_IDS")
            .ok()
            .map(|raw| parse_admin_ids(&raw))
            .unwrap_or_default()
    });
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Turns `https://t.me/name`, `t.me/name` or `name` into `@name`.
/// Numeric chat ids (`-100...`) pass through unchanged.
pub fn normalize_channel(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let name = trimmed
        .strip_prefix("https://t.me/")
        .or_else(|| trimmed.strip_prefix("http://t.me/"))
        .or_else(|| trimmed.strip_prefix("t.me/"))
        .unwrap_or(trimmed);

    if name.starts_with('@') || name.parse::<i64>().is_ok() {
        name.to_string()
    } else {
        format!("@{}", name)
    }
}

/// Runtime configuration handed to the web layer and handlers.
///
/// Built once from the environment statics; tests construct it directly.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: Option<String>,
    pub required_channel: String,
    pub session_secret: Option<String>,
    pub webhook_secret: Option<String>,
    pub admin_ids: Vec<i64>,
    pub port: u16,
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self {
            bot_token: BOT_TOKEN.clone(),
            required_channel: REQUIRED_CHANNEL.clone(),
            session_secret: SESSION_SECRET.clone(),
            webhook_secret: WEBHOOK_SECRET.clone(),
            admin_ids: admin::ADMIN_IDS.clone(),
            port: *PORT,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some()
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// Logs the effective configuration without secrets.
    pub fn log_summary(&self) {
        log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        log::info!("FreelanceTM configuration");
        log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        if self.is_configured() {
            log::info!("✅ BOT_TOKEN: set");
        } else {
            log::warn!("⚠️  BOT_TOKEN: not set, webhook updates will be rejected with 503");
        }
        log::info!("Required channel: {}", self.required_channel);
        log::info!(
            "Webhook secret header: {}",
            if self.webhook_secret.is_some() { "checked" } else { "not checked" }
        );
        log::info!("Session secret: {}", if self.session_secret.is_some() { "set" } else { "not set" });
        log::info!("Admins: {}", self.admin_ids.len());
        log::info!("Port: {}", self.port);
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            required_channel: DEFAULT_CHANNEL.to_string(),
            session_secret: None,
            webhook_secret: None,
            admin_ids: Vec::new(),
            port: DEFAULT_PORT,
        }
    }
}
