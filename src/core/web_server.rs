//! HTTP entry point: liveness, bot metadata and the Telegram webhook.
//!
//! Routes:
//! - `GET /`          - liveness, works without a bot token
//! - `GET /bot_info`  - getMe + getWebhookInfo summary
//! - `POST /{token}`  - webhook; the path segment must equal the bot token

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::core::config::BotConfig;
use crate::core::error::{AppError, AppResult};
use crate::core::rate_limiter::RateLimiter;
use crate::core::validation::tokens_match;
use crate::storage::MemoryStore;
use crate::telegram::update::{sender, user_id, Update};
use crate::telegram::{create_bot, handle_update, BotApi, BotInfo, HandlerDeps};

/// Header Telegram fills with the `secret_token` given to `setWebhook`.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Shared state for the web server.
///
/// `deps` is `None` when no bot token is configured; the server then only
/// answers the informational routes.
#[derive(Clone)]
pub struct WebState {
    pub config: Arc<BotConfig>,
    pub deps: Option<HandlerDeps>,
}

impl WebState {
    pub fn new(config: Arc<BotConfig>, deps: Option<HandlerDeps>) -> Self {
        Self { config, deps }
    }

    /// Production wiring: a real bot client, a fresh store and the default
    /// rate limits. Without a token the state is degraded.
    pub fn from_config(config: BotConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);
        let deps = match config.bot_token.as_deref() {
            Some(token) => {
                let bot = create_bot(token)?;
                Some(HandlerDeps::new(
                    Arc::new(MemoryStore::new()),
                    Arc::new(BotApi::new(bot)),
                    Arc::clone(&config),
                    RateLimiter::new(),
                ))
            }
            None => {
                log::warn!("BOT_TOKEN is not set; webhook processing is disabled");
                None
            }
        };
        Ok(Self::new(config, deps))
    }
}

pub fn create_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/bot_info", get(bot_info_handler))
        .route("/{token}", post(webhook_handler))
        .with_state(state)
}

/// Start the HTTP server and serve until the process is stopped.
pub async fn start_web_server(port: u16, state: WebState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = create_router(state);

    log::info!("Starting web server on http://{}", addr);
    log::info!("  /          - Liveness");
    log::info!("  /bot_info  - Bot metadata");
    log::info!("  /<token>   - Telegram webhook");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `GET /`: liveness.
async fn index_handler(State(state): State<WebState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "FreelanceTM Bot webhook server is running",
        "bot_info": "Webhook endpoint ready for Telegram updates",
        "bot_configured": state.config.is_configured(),
    }))
}

/// `GET /bot_info`: bot identity and webhook status.
async fn bot_info_handler(State(state): State<WebState>) -> AppResult<Response> {
    let Some(deps) = state.deps.as_ref() else {
        return Ok(Json(json!({
            "status": "Bot not configured",
            "bot_token_required": true,
            "webhook_url": null,
            "has_webhook": false,
        }))
        .into_response());
    };

    let info: BotInfo = deps.api.bot_info().await?;
    Ok(Json(info).into_response())
}

/// `POST /{token}`: one Telegram update.
///
/// The last reply produced for the update is returned as the webhook
/// response body; earlier ones are sent through the Bot API first.
async fn webhook_handler(
    State(state): State<WebState>,
    Path(token): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Response> {
    let Some(deps) = state.deps.as_ref() else {
        log::warn!("Webhook request ignored: bot not configured");
        return Err(AppError::NotConfigured);
    };

    let expected = state.config.bot_token.as_deref().unwrap_or_default();
    if !tokens_match(expected, &token) {
        log::warn!("Webhook called with a wrong path token");
        return Err(AppError::Unauthorized);
    }

    if let Some(secret) = state.config.webhook_secret.as_deref() {
        let provided = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if !tokens_match(secret, provided) {
            log::warn!("Webhook called with a wrong secret header");
            return Err(AppError::Unauthorized);
        }
    }

    let update: Update = serde_json::from_slice(&body)?;
    log::debug!("Received update {}", update.id.0);

    if let Some(from) = sender(&update) {
        if !deps.rate_limiter.check(user_id(from)).await {
            return Ok(ok_response());
        }
    }

    let outbox = handle_update(deps, update).await?;
    let (before, last) = outbox.into_webhook_parts();
    for reply in &before {
        if let Err(e) = deps.api.deliver(reply).await {
            log::error!("Failed to deliver {} to {:?}: {}", reply.method(), reply.chat_id(), e);
        }
    }

    Ok(match last {
        Some(reply) => Json(reply).into_response(),
        None => ok_response(),
    })
}

fn ok_response() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}
