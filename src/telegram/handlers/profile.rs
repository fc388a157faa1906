//! Own profile and counterpart contact lookup

use crate::core::error::AppResult;
use crate::core::utils::escape_html;
use crate::telegram::format::{display_name, profile_text};
use crate::telegram::handlers::Context;

pub async fn show_profile(ctx: &mut Context) -> AppResult<()> {
    let Some(user) = ctx.user.clone() else {
        return Ok(());
    };
    let rating = ctx.deps.store.average_rating(user.id).await;
    let review_count = ctx.deps.store.reviews_for_user(user.id).await.len();
    ctx.send(profile_text(&user, rating, review_count, ctx.lang));
    Ok(())
}

/// "Contact" button: shows the target user's contact to the presser.
pub async fn contact(ctx: &mut Context, target_id: i64) -> AppResult<()> {
    ctx.answer(None);

    let Some(target) = ctx.deps.store.get_user(target_id).await else {
        ctx.send(ctx.t("contact.user_not_found"));
        return Ok(());
    };

    let contact = target.profile.contact.trim();
    if contact.is_empty() {
        ctx.send(ctx.t("contact.missing"));
    } else {
        let header = ctx.tr("contact.info", &[("name", escape_html(display_name(&target)))]);
        ctx.send(format!("{}\n\n{}", header, escape_html(contact)));
    }
    Ok(())
}
