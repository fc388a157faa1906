//! Update routing
//!
//! `handle_update` turns one decoded webhook update into an ordered
//! [`Outbox`] of Bot API calls. It never talks to Telegram itself except for
//! the channel membership check; delivery is up to the caller.

pub mod callbacks;
pub mod commands;
pub mod orders;
pub mod profile;
pub mod registration;
pub mod reviews;
mod types;

use crate::core::config;
use crate::core::error::AppResult;
use crate::core::validation::{is_spam_message, sanitize_input};
use crate::i18n::matches_any;
use crate::storage::models::Role;
use crate::storage::session::Dialogue;
use crate::telegram::bot::Command;
use crate::telegram::reply::Outbox;
use crate::telegram::update::{Message, Update, UpdateKind};

pub use callbacks::CallbackAction;
pub use types::{CallbackInfo, Context, HandlerDeps};

pub async fn handle_update(deps: &HandlerDeps, update: Update) -> AppResult<Outbox> {
    match update.kind {
        UpdateKind::Message(message) => handle_message(deps, message).await,
        UpdateKind::CallbackQuery(query) => callbacks::handle_callback(deps, query).await,
        _ => {
            log::debug!("Update {} has nothing to handle", update.id.0);
            Ok(Outbox::new())
        }
    }
}

async fn handle_message(deps: &HandlerDeps, message: Message) -> AppResult<Outbox> {
    let (Some(text), Some(from)) = (message.text(), message.from.as_ref()) else {
        return Ok(Outbox::new());
    };
    if from.is_bot {
        return Ok(Outbox::new());
    }

    let mut ctx = Context::load(deps.clone(), message.chat.id.0, from.clone()).await;
    route_text(&mut ctx, text).await?;
    Ok(ctx.outbox)
}

async fn route_text(ctx: &mut Context, text: &str) -> AppResult<()> {
    if let Some(command) = Command::from_text(text) {
        return match command {
            Command::Start => commands::start(ctx).await,
            Command::Help => commands::help(ctx),
            Command::Admin => commands::admin(ctx).await,
        };
    }

    // Back leaves any dialogue, so it is checked before session steps
    if matches_any(text, "btn.back") {
        return commands::back(ctx).await;
    }

    if let Some(session) = ctx.session.clone() {
        match session.dialogue {
            Dialogue::Registration(draft) => return registration::handle_step(ctx, draft, text).await,
            Dialogue::Order(draft) => return orders::handle_step(ctx, draft, text).await,
            Dialogue::Review(draft) if draft.rating.is_some() => {
                return reviews::handle_comment(ctx, draft, text).await;
            }
            Dialogue::Review(_) | Dialogue::ChoosingRole => {}
        }
    }

    if ctx.user.is_none() {
        return commands::start(ctx).await;
    }

    if matches_any(text, "btn.create_order") {
        orders::start_order(ctx).await
    } else if matches_any(text, "btn.view_orders") {
        orders::view_orders(ctx).await
    } else if matches_any(text, "btn.my_orders") {
        orders::my_orders(ctx).await
    } else if matches_any(text, "btn.my_responses") {
        orders::my_responses(ctx).await
    } else if matches_any(text, "btn.profile") {
        profile::show_profile(ctx).await
    } else if matches_any(text, "btn.reviews") {
        reviews::show_reviews(ctx).await
    } else if matches_any(text, "btn.help") {
        commands::help(ctx)
    } else if matches_any(text, "btn.admin_panel") {
        commands::admin(ctx).await
    } else {
        commands::unknown(ctx).await
    }
}

/// Sanitized free-text input for a dialogue step. Sends the matching error and
/// returns `None` when the input is empty or looks like spam.
pub(crate) fn read_input(ctx: &mut Context, text: &str) -> Option<String> {
    let input = sanitize_input(text, config::text::MAX_INPUT);
    if input.is_empty() {
        ctx.send(ctx.t("error.empty"));
        return None;
    }
    if is_spam_message(text) {
        log::warn!("Spam-like input from user {} rejected", ctx.user_id());
        ctx.send(ctx.t("error.spam"));
        return None;
    }
    Some(input)
}

/// Sends the role error and returns `false` unless the registered user has `role`.
pub(crate) fn require_role(ctx: &mut Context, role: Role) -> bool {
    if ctx.user.as_ref().is_some_and(|u| u.role == role) {
        return true;
    }
    let key = match role {
        Role::Freelancer => "error.not_freelancer",
        Role::Client => "error.not_client",
    };
    let text = ctx.t(key);
    if ctx.callback.is_some() {
        ctx.answer(Some(text));
    } else {
        ctx.send(text);
    }
    false
}
