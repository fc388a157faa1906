//! /start, /help, /admin, back and the main menu

use crate::core::error::AppResult;
use crate::storage::models::{Role, User};
use crate::telegram::handlers::Context;
use crate::telegram::keyboards::{language_keyboard, main_menu_keyboard, subscription_keyboard};

/// Greeting plus the role's reply keyboard.
pub fn show_main_menu(ctx: &mut Context, user: &User) {
    let key = match user.role {
        Role::Freelancer => "menu.freelancer",
        Role::Client => "menu.client",
    };
    let keyboard = main_menu_keyboard(user.role, ctx.lang, ctx.is_admin());
    ctx.send_with(ctx.t(key), keyboard);
}

/// Membership in the required channel. API failures count as "not a member".
pub async fn is_subscribed(ctx: &Context) -> bool {
    let channel = &ctx.deps.config.required_channel;
    match ctx.deps.api.is_channel_member(channel, ctx.user_id()).await {
        Ok(member) => member,
        Err(e) => {
            log::warn!("Membership check for user {} in {} failed: {}", ctx.user_id(), channel, e);
            false
        }
    }
}

pub async fn start(ctx: &mut Context) -> AppResult<()> {
    if let Some(user) = ctx.user.clone() {
        ctx.clear_session().await;
        show_main_menu(ctx, &user);
        return Ok(());
    }

    if !is_subscribed(ctx).await {
        let text = format!("{}\n\n{}", ctx.t("start.welcome"), ctx.deps.config.required_channel);
        ctx.send_with(text, subscription_keyboard(ctx.lang));
        return Ok(());
    }

    ctx.send_with(ctx.t("start.choose_language"), language_keyboard());
    Ok(())
}

pub fn help(ctx: &mut Context) -> AppResult<()> {
    ctx.send(ctx.t("help.text"));
    Ok(())
}

/// Platform statistics. Non-admins get the unknown-command reply.
pub async fn admin(ctx: &mut Context) -> AppResult<()> {
    if !ctx.is_admin() {
        return unknown(ctx).await;
    }

    let stats = ctx.deps.store.stats().await;
    log::info!("Admin {} requested platform stats", ctx.user_id());
    let text = ctx.tr(
        "admin.stats",
        &[
            ("total_users", stats.total_users.to_string()),
            ("freelancers", stats.freelancers.to_string()),
            ("clients", stats.clients.to_string()),
            ("total_orders", stats.total_orders.to_string()),
            ("active_orders", stats.active_orders.to_string()),
            ("completed_orders", stats.completed_orders.to_string()),
            ("total_reviews", stats.total_reviews.to_string()),
        ],
    );
    ctx.send(text);
    Ok(())
}

/// Drops any dialogue in progress.
pub async fn back(ctx: &mut Context) -> AppResult<()> {
    ctx.clear_session().await;
    match ctx.user.clone() {
        Some(user) => {
            show_main_menu(ctx, &user);
            Ok(())
        }
        None => start(ctx).await,
    }
}

pub async fn unknown(ctx: &mut Context) -> AppResult<()> {
    let Some(user) = ctx.user.clone() else {
        return start(ctx).await;
    };
    let keyboard = main_menu_keyboard(user.role, ctx.lang, ctx.is_admin());
    ctx.send_with(ctx.t("menu.unknown"), keyboard);
    Ok(())
}
