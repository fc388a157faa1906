//! Registration dialogue: language, role, then the profile fields

use crate::core::error::AppResult;
use crate::i18n::Lang;
use crate::storage::models::{NewUser, Profile, Role};
use crate::storage::session::{Dialogue, RegistrationDraft, RegistrationStep, Session};
use crate::telegram::handlers::commands::is_subscribed;
use crate::telegram::handlers::{read_input, Context};
use crate::telegram::keyboards::{back_keyboard, language_keyboard, main_menu_keyboard, role_keyboard};

/// "Check subscription" button.
pub async fn check_subscription(ctx: &mut Context) -> AppResult<()> {
    if is_subscribed(ctx).await {
        ctx.edit_or_send(ctx.t("start.choose_language"), Some(language_keyboard()));
    } else {
        ctx.answer(Some(ctx.t("start.subscription_required")));
    }
    Ok(())
}

pub async fn choose_language(ctx: &mut Context, lang: Lang) -> AppResult<()> {
    ctx.lang = lang;
    ctx.set_session(Session::new(lang, Dialogue::ChoosingRole)).await;
    ctx.edit_or_send(ctx.t("start.choose_role"), Some(role_keyboard(lang)));
    Ok(())
}

pub async fn choose_role(ctx: &mut Context, role: Role) -> AppResult<()> {
    if ctx.session.is_none() {
        ctx.answer(Some(ctx.t("start.session_expired")));
        return Ok(());
    }

    let session = Session::new(ctx.lang, Dialogue::Registration(RegistrationDraft::new(role)));
    ctx.set_session(session).await;
    ctx.edit_or_send(ctx.t("registration.name"), None);
    Ok(())
}

pub async fn handle_step(ctx: &mut Context, mut draft: RegistrationDraft, text: &str) -> AppResult<()> {
    let Some(input) = read_input(ctx, text) else {
        return Ok(());
    };

    let next_prompt = match draft.step {
        RegistrationStep::Name => {
            draft.name = input;
            draft.step = RegistrationStep::Skills;
            "registration.skills"
        }
        RegistrationStep::Skills => {
            draft.skills = input;
            draft.step = RegistrationStep::Description;
            "registration.description"
        }
        RegistrationStep::Description => {
            draft.description = input;
            draft.step = RegistrationStep::Contact;
            "registration.contact"
        }
        RegistrationStep::Contact => return complete(ctx, draft, input).await,
    };

    ctx.set_session(Session::new(ctx.lang, Dialogue::Registration(draft))).await;
    ctx.send_with(ctx.t(next_prompt), back_keyboard(ctx.lang));
    Ok(())
}

async fn complete(ctx: &mut Context, draft: RegistrationDraft, contact: String) -> AppResult<()> {
    let user = ctx
        .deps
        .store
        .create_user(NewUser {
            id: ctx.user_id(),
            first_name: ctx.from.first_name.clone(),
            username: ctx.from.username.clone(),
            language: ctx.lang,
            role: draft.role,
            profile: Profile {
                name: draft.name,
                skills: draft.skills,
                description: draft.description,
                contact,
            },
        })
        .await;
    ctx.clear_session().await;

    let keyboard = main_menu_keyboard(user.role, ctx.lang, ctx.is_admin());
    ctx.send_with(ctx.t("registration.complete"), keyboard);
    ctx.user = Some(user);
    Ok(())
}
