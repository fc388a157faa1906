//! Review dialogue (rating, then comment) and the reviews list

use crate::core::config;
use crate::core::error::AppResult;
use crate::core::utils::escape_html;
use crate::i18n;
use crate::storage::models::OrderStatus;
use crate::storage::session::{Dialogue, ReviewDraft, Session};
use crate::telegram::format::{display_name, review_entry};
use crate::telegram::handlers::commands::show_main_menu;
use crate::telegram::handlers::{read_input, Context};
use crate::telegram::keyboards::rating_keyboard;

async fn order_completed(ctx: &Context, order_id: u64) -> bool {
    ctx.deps
        .store
        .get_order(order_id)
        .await
        .is_some_and(|order| order.status == OrderStatus::Completed)
}

/// "Leave a review" button from a completed order.
pub async fn start_review(ctx: &mut Context, reviewed_id: i64, order_id: u64) -> AppResult<()> {
    let Some(order) = ctx.deps.store.get_order(order_id).await else {
        ctx.answer(Some(ctx.t("order.not_found")));
        return Ok(());
    };
    let allowed =
        order.is_participant(ctx.user_id()) && order.is_participant(reviewed_id) && reviewed_id != ctx.user_id();
    if ctx.user.is_none() || !allowed {
        ctx.answer(Some(ctx.t("order.not_yours")));
        return Ok(());
    }
    if order.status != OrderStatus::Completed {
        ctx.answer(Some(ctx.t("review.not_completed")));
        return Ok(());
    }

    let draft = ReviewDraft {
        reviewed_id,
        order_id,
        rating: None,
    };
    ctx.set_session(Session::new(ctx.lang, Dialogue::Review(draft))).await;
    ctx.edit_or_send(ctx.t("review.select_rating"), Some(rating_keyboard()));
    Ok(())
}

pub async fn choose_rating(ctx: &mut Context, rating: u8) -> AppResult<()> {
    let mut draft = match ctx.session.as_ref().map(|s| &s.dialogue) {
        Some(Dialogue::Review(draft)) => *draft,
        _ => {
            ctx.answer(Some(ctx.t("start.session_expired")));
            return Ok(());
        }
    };

    draft.rating = Some(rating);
    ctx.set_session(Session::new(ctx.lang, Dialogue::Review(draft))).await;
    ctx.edit_or_send(format!("{}\n\n⭐ {}/5", ctx.t("review.enter_text"), rating), None);
    Ok(())
}

pub async fn handle_comment(ctx: &mut Context, draft: ReviewDraft, text: &str) -> AppResult<()> {
    let Some(rating) = draft.rating else {
        return Ok(());
    };
    let Some(comment) = read_input(ctx, text) else {
        return Ok(());
    };

    // The order may have changed since the rating was picked
    if !order_completed(ctx, draft.order_id).await {
        log::warn!("Review for order #{} dropped, order is not completed", draft.order_id);
        ctx.send(ctx.t("review.not_completed"));
    } else if ctx
        .deps
        .store
        .add_review(draft.order_id, ctx.user_id(), draft.reviewed_id, rating, comment.clone())
        .await
    {
        ctx.send(ctx.t("review.added"));
        if let Some(reviewed) = ctx.deps.store.get_user(draft.reviewed_id).await {
            let text = format!(
                "{}\n\n⭐ {}/5\n💬 {}",
                i18n::t(reviewed.language, "review.received"),
                rating,
                escape_html(&comment)
            );
            ctx.notify(reviewed.id, text, None);
        }
    } else {
        ctx.send(ctx.t("review.error"));
    }

    ctx.clear_session().await;
    if let Some(user) = ctx.user.clone() {
        show_main_menu(ctx, &user);
    }
    Ok(())
}

pub async fn show_reviews(ctx: &mut Context) -> AppResult<()> {
    let reviews = ctx.deps.store.reviews_for_user(ctx.user_id()).await;
    if reviews.is_empty() {
        ctx.send(ctx.t("review.none"));
        return Ok(());
    }

    let average = ctx.deps.store.average_rating(ctx.user_id()).await;
    let mut text = format!(
        "{}\n\n{}\n{}\n",
        ctx.t("review.header"),
        ctx.tr("review.average", &[("rating", format!("{:.1}", average))]),
        ctx.tr("review.total", &[("count", reviews.len().to_string())]),
    );

    for review in reviews.iter().take(config::pagination::REVIEWS) {
        let reviewer_name = match ctx.deps.store.get_user(review.reviewer_id).await {
            Some(reviewer) => display_name(&reviewer).to_string(),
            None => ctx.t("review.anonymous"),
        };
        let date = review.created_at.format("%d.%m.%Y").to_string();
        text.push('\n');
        text.push_str(&review_entry(review.rating, &reviewer_name, &review.comment, &date));
        text.push('\n');
    }

    ctx.send(text.trim_end().to_string());
    Ok(())
}
