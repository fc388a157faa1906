//! Orders: creation dialogue, listings, responses, assignment and completion

use crate::core::config;
use crate::core::error::AppResult;
use crate::core::validation::{validate_budget, validate_deadline};
use crate::i18n::{self, is_known_category};
use crate::storage::models::{NewOrder, OrderStatus, Role};
use crate::storage::session::{Dialogue, OrderDraft, OrderStep, Session};
use crate::telegram::format::{display_name, order_text, profile_text};
use crate::telegram::handlers::{read_input, require_role, Context};
use crate::telegram::keyboards::{
    back_keyboard, categories_keyboard, complete_order_keyboard, main_menu_keyboard, my_order_keyboard,
    respond_keyboard, response_actions_keyboard, review_keyboard,
};

// ---- creation ----

pub async fn start_order(ctx: &mut Context) -> AppResult<()> {
    if !require_role(ctx, Role::Client) {
        return Ok(());
    }
    ctx.set_session(Session::new(ctx.lang, Dialogue::Order(OrderDraft::default()))).await;
    ctx.send_with(ctx.t("order.title_prompt"), back_keyboard(ctx.lang));
    Ok(())
}

pub async fn handle_step(ctx: &mut Context, mut draft: OrderDraft, text: &str) -> AppResult<()> {
    match draft.step {
        OrderStep::Title | OrderStep::Description | OrderStep::Contact => {
            let Some(input) = read_input(ctx, text) else {
                return Ok(());
            };
            match draft.step {
                OrderStep::Title => {
                    draft.title = input;
                    draft.step = OrderStep::Description;
                    save_draft(ctx, draft).await;
                    ctx.send_with(ctx.t("order.description_prompt"), back_keyboard(ctx.lang));
                }
                OrderStep::Description => {
                    draft.description = input;
                    draft.step = OrderStep::Category;
                    save_draft(ctx, draft).await;
                    ctx.send_with(ctx.t("order.category_prompt"), categories_keyboard(ctx.lang));
                }
                _ => return create(ctx, draft, input).await,
            }
        }
        OrderStep::Category => {
            // Categories come from the inline keyboard only
            ctx.send_with(ctx.t("order.category_prompt"), categories_keyboard(ctx.lang));
        }
        OrderStep::Budget => match validate_budget(text) {
            Ok(budget) => {
                draft.budget = Some(budget);
                draft.step = OrderStep::Deadline;
                save_draft(ctx, draft).await;
                ctx.send_with(ctx.t("order.deadline_prompt"), back_keyboard(ctx.lang));
            }
            Err(e) => {
                log::debug!("User {}: {}", ctx.user_id(), e);
                ctx.send(ctx.t("order.invalid_budget"));
            }
        },
        OrderStep::Deadline => match validate_deadline(text) {
            Ok(days) => {
                draft.deadline_days = Some(days);
                draft.step = OrderStep::Contact;
                save_draft(ctx, draft).await;
                ctx.send_with(ctx.t("order.contact_prompt"), back_keyboard(ctx.lang));
            }
            Err(e) => {
                log::debug!("User {}: {}", ctx.user_id(), e);
                ctx.send(ctx.t("order.invalid_deadline"));
            }
        },
    }
    Ok(())
}

/// Category button while the draft waits for one.
pub async fn choose_category(ctx: &mut Context, key: &str) -> AppResult<()> {
    let draft = match ctx.session.as_ref().map(|s| &s.dialogue) {
        Some(Dialogue::Order(draft)) if draft.step == OrderStep::Category => draft.clone(),
        _ => {
            ctx.answer(Some(ctx.t("start.session_expired")));
            return Ok(());
        }
    };
    if !is_known_category(key) {
        log::warn!("User {} sent unknown category {:?}", ctx.user_id(), key);
        return Ok(());
    }

    let mut draft = draft;
    draft.category = Some(key.to_string());
    draft.step = OrderStep::Budget;
    save_draft(ctx, draft).await;

    let text = format!("🏷️ {}\n\n{}", i18n::category_name(ctx.lang, key), ctx.t("order.budget_prompt"));
    ctx.edit_or_send(text, None);
    Ok(())
}

async fn save_draft(ctx: &mut Context, draft: OrderDraft) {
    ctx.set_session(Session::new(ctx.lang, Dialogue::Order(draft))).await;
}

async fn create(ctx: &mut Context, draft: OrderDraft, contact: String) -> AppResult<()> {
    let (Some(category), Some(budget), Some(deadline_days)) = (draft.category, draft.budget, draft.deadline_days) else {
        // Incomplete draft; restart the dialogue
        ctx.clear_session().await;
        ctx.send(ctx.t("start.session_expired"));
        return Ok(());
    };

    ctx.deps
        .store
        .create_order(NewOrder {
            client_id: ctx.user_id(),
            title: draft.title,
            description: draft.description,
            category,
            budget,
            deadline_days,
            contact,
        })
        .await;
    ctx.clear_session().await;

    match ctx.user.as_ref().map(|u| u.role) {
        Some(role) => {
            let keyboard = main_menu_keyboard(role, ctx.lang, ctx.is_admin());
            ctx.send_with(ctx.t("order.created"), keyboard);
        }
        None => ctx.send(ctx.t("order.created")),
    }
    Ok(())
}

// ---- freelancer side ----

pub async fn view_orders(ctx: &mut Context) -> AppResult<()> {
    if !require_role(ctx, Role::Freelancer) {
        return Ok(());
    }

    let orders = ctx.deps.store.active_orders_for_freelancer(ctx.user_id()).await;
    if orders.is_empty() {
        ctx.send(ctx.t("order.none_available"));
        return Ok(());
    }

    ctx.send(ctx.t("order.list"));
    for order in orders.iter().take(config::pagination::ORDERS) {
        ctx.send_with(order_text(order, ctx.lang), respond_keyboard(order.id, ctx.lang));
    }
    Ok(())
}

pub async fn respond(ctx: &mut Context, order_id: u64) -> AppResult<()> {
    if !require_role(ctx, Role::Freelancer) {
        return Ok(());
    }

    let Some(order) = ctx.deps.store.get_order(order_id).await else {
        ctx.answer(Some(ctx.t("order.not_found")));
        return Ok(());
    };
    if order.status != OrderStatus::Active || order.client_id == ctx.user_id() {
        ctx.answer(Some(ctx.t("order.not_open")));
        return Ok(());
    }

    let name = ctx.user.as_ref().map(|u| display_name(u).to_string()).unwrap_or_default();
    let message = ctx.tr("order.response_message", &[("name", name)]);
    if !ctx.deps.store.add_response(order_id, ctx.user_id(), message).await {
        ctx.answer(Some(ctx.t("order.response_exists")));
        return Ok(());
    }

    ctx.answer(Some(ctx.t("order.response_sent")));
    if let Some(client) = ctx.deps.store.get_user(order.client_id).await {
        let text = format!(
            "{}\n\n{}",
            i18n::t(client.language, "order.new_response"),
            order_text(&order, client.language)
        );
        ctx.notify(client.id, text, None);
    }
    Ok(())
}

pub async fn my_responses(ctx: &mut Context) -> AppResult<()> {
    if !require_role(ctx, Role::Freelancer) {
        return Ok(());
    }

    let responses = ctx.deps.store.responses_by_freelancer(ctx.user_id()).await;
    if responses.is_empty() {
        ctx.send(ctx.t("order.no_my_responses"));
        return Ok(());
    }

    ctx.send(ctx.t("order.my_responses_header"));
    for (response, order) in responses.iter().take(config::pagination::MY_RESPONSES) {
        let sent_at = ctx.tr(
            "order.response_sent_at",
            &[("date", response.created_at.format("%d.%m.%Y").to_string())],
        );
        ctx.send(format!("{}\n\n{}", order_text(order, ctx.lang), sent_at));
    }
    Ok(())
}

// ---- client side ----

pub async fn my_orders(ctx: &mut Context) -> AppResult<()> {
    if !require_role(ctx, Role::Client) {
        return Ok(());
    }

    let orders = ctx.deps.store.orders_by_client(ctx.user_id()).await;
    if orders.is_empty() {
        ctx.send(ctx.t("order.none_mine"));
        return Ok(());
    }

    ctx.send(ctx.t("order.my_list"));
    for order in orders.iter().take(config::pagination::MY_ORDERS) {
        let count = ctx.deps.store.responses_for_order(order.id).await.len();
        let mut text = order_text(order, ctx.lang);
        if count > 0 {
            text.push_str("\n\n");
            text.push_str(&ctx.tr("order.responses_count", &[("count", count.to_string())]));
        }
        let keyboard = my_order_keyboard(order.id, count, order.status == OrderStatus::InProgress, ctx.lang);
        match keyboard {
            Some(keyboard) => ctx.send_with(text, keyboard),
            None => ctx.send(text),
        }
    }
    Ok(())
}

pub async fn view_responses(ctx: &mut Context, order_id: u64) -> AppResult<()> {
    let order = match ctx.deps.store.get_order(order_id).await {
        Some(order) if order.client_id == ctx.user_id() => order,
        _ => {
            ctx.answer(Some(ctx.t("order.not_yours")));
            return Ok(());
        }
    };

    let responses = ctx.deps.store.responses_for_order(order_id).await;
    if responses.is_empty() {
        ctx.answer(Some(ctx.t("order.no_responses")));
        return Ok(());
    }

    ctx.edit_or_send(ctx.tr("order.responses_header", &[("id", order_id.to_string())]), None);
    let can_select = order.status == OrderStatus::Active;
    for (index, response) in responses.iter().take(config::pagination::RESPONSES).enumerate() {
        let Some(freelancer) = ctx.deps.store.get_user(response.freelancer_id).await else {
            continue;
        };
        let rating = ctx.deps.store.average_rating(freelancer.id).await;
        let review_count = ctx.deps.store.reviews_for_user(freelancer.id).await.len();
        let text = format!(
            "{}\n\n{}",
            ctx.tr("order.response_item", &[("index", (index + 1).to_string())]),
            profile_text(&freelancer, rating, review_count, ctx.lang)
        );
        let keyboard = response_actions_keyboard(freelancer.id, order_id, can_select, ctx.lang);
        ctx.send_with(text, keyboard);
    }
    Ok(())
}

/// Client picks a freelancer from the responses.
pub async fn accept(ctx: &mut Context, freelancer_id: i64, order_id: u64) -> AppResult<()> {
    match ctx.deps.store.get_order(order_id).await {
        Some(order) if order.client_id == ctx.user_id() => {
            if order.status != OrderStatus::Active {
                ctx.answer(Some(ctx.t("order.not_open")));
                return Ok(());
            }
        }
        _ => {
            ctx.answer(Some(ctx.t("order.not_yours")));
            return Ok(());
        }
    }

    let Some(order) = ctx.deps.store.accept_freelancer(order_id, freelancer_id).await else {
        ctx.answer(Some(ctx.t("order.not_open")));
        return Ok(());
    };
    log::info!("Order #{} assigned to freelancer {}", order_id, freelancer_id);

    ctx.answer(Some(ctx.t("order.freelancer_selected_toast")));
    ctx.edit_or_send(ctx.tr("order.freelancer_selected", &[("id", order_id.to_string())]), None);

    if let Some(freelancer) = ctx.deps.store.get_user(freelancer_id).await {
        let lang = freelancer.language;
        let text = format!(
            "{}\n\n{}",
            i18n::t(lang, "order.accepted_notification"),
            order_text(&order, lang)
        );
        ctx.notify(freelancer.id, text, Some(complete_order_keyboard(order_id, lang)));
    }
    Ok(())
}

/// Either participant closes the order and is offered to review the other.
pub async fn complete(ctx: &mut Context, order_id: u64) -> AppResult<()> {
    let Some(order) = ctx.deps.store.get_order(order_id).await else {
        ctx.answer(Some(ctx.t("order.not_found")));
        return Ok(());
    };
    if !order.is_participant(ctx.user_id()) {
        ctx.answer(Some(ctx.t("order.not_yours")));
        return Ok(());
    }
    if order.status == OrderStatus::Completed {
        ctx.answer(Some(ctx.t("order.already_completed")));
        return Ok(());
    }

    let Some(order) = ctx.deps.store.complete_order(order_id).await else {
        ctx.answer(Some(ctx.t("order.already_completed")));
        return Ok(());
    };
    log::info!("Order #{} completed by user {}", order_id, ctx.user_id());
    ctx.answer(Some(ctx.t("order.completed_toast")));

    let text = ctx.tr("order.completed", &[("id", order_id.to_string())]);
    let counterpart = if order.client_id == ctx.user_id() {
        order.freelancer_id.map(|id| (id, Role::Freelancer))
    } else {
        Some((order.client_id, Role::Client))
    };
    match counterpart {
        Some((reviewed_id, reviewed_role)) => {
            ctx.send_with(text, review_keyboard(reviewed_id, order_id, reviewed_role, ctx.lang));
        }
        None => ctx.send(text),
    }
    Ok(())
}
