//! Inline button callbacks
//!
//! Callback data is a short `snake_case` prefix followed by ids, e.g.
//! `accept_<freelancer>_<order>`. See [`crate::telegram::keyboards`] for the
//! producing side.

use crate::core::error::AppResult;
use crate::core::validation::validate_rating;
use crate::i18n::Lang;
use crate::storage::models::Role;
use crate::telegram::handlers::{orders, profile, registration, reviews, CallbackInfo, Context, HandlerDeps};
use crate::telegram::reply::Outbox;
use crate::telegram::update::{self, CallbackQuery};

#[derive(Debug, Clone, PartialEq)]
pub enum CallbackAction {
    CheckSubscription,
    Language(Lang),
    Role(Role),
    Category(String),
    Respond(u64),
    ViewResponses(u64),
    Contact(i64),
    Accept { freelancer_id: i64, order_id: u64 },
    CompleteOrder(u64),
    Review { reviewed_id: i64, order_id: u64 },
    Rating(u8),
}

fn id_pair(rest: &str) -> Option<(i64, u64)> {
    let (user, order) = rest.split_once('_')?;
    Some((user.parse().ok()?, order.parse().ok()?))
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        if data == "check_subscription" {
            return Some(Self::CheckSubscription);
        }
        if let Some(rest) = data.strip_prefix("view_responses_") {
            return rest.parse().ok().map(Self::ViewResponses);
        }
        if let Some(rest) = data.strip_prefix("complete_order_") {
            return rest.parse().ok().map(Self::CompleteOrder);
        }
        if let Some(rest) = data.strip_prefix("lang_") {
            return rest.parse().ok().map(Self::Language);
        }
        if let Some(rest) = data.strip_prefix("role_") {
            return rest.parse().ok().map(Self::Role);
        }
        if let Some(rest) = data.strip_prefix("category_") {
            return (!rest.is_empty()).then(|| Self::Category(rest.to_string()));
        }
        if let Some(rest) = data.strip_prefix("respond_") {
            return rest.parse().ok().map(Self::Respond);
        }
        if let Some(rest) = data.strip_prefix("contact_") {
            return rest.parse().ok().map(Self::Contact);
        }
        if let Some(rest) = data.strip_prefix("accept_") {
            let (freelancer_id, order_id) = id_pair(rest)?;
            return Some(Self::Accept { freelancer_id, order_id });
        }
        if let Some(rest) = data.strip_prefix("review_") {
            let (reviewed_id, order_id) = id_pair(rest)?;
            return Some(Self::Review { reviewed_id, order_id });
        }
        if let Some(rest) = data.strip_prefix("rating_") {
            return validate_rating(rest).ok().map(Self::Rating);
        }
        None
    }
}

pub async fn handle_callback(deps: &HandlerDeps, query: CallbackQuery) -> AppResult<Outbox> {
    let chat_id = query
        .message
        .as_ref()
        .map_or_else(|| update::user_id(&query.from), |m| m.chat().id.0);
    let message_id = query.message.as_ref().map(|m| m.id().0);
    let action = query.data.as_deref().and_then(CallbackAction::parse);

    let mut ctx = Context::load(deps.clone(), chat_id, query.from.clone()).await;
    ctx.callback = Some(CallbackInfo {
        id: query.id.0.clone(),
        message_id,
        answered: false,
    });

    match action {
        Some(action) => {
            log::debug!("User {} pressed {:?}", ctx.user_id(), action);
            dispatch(&mut ctx, action).await?;
        }
        None => log::warn!("Unrecognized callback data {:?} from user {}", query.data, ctx.user_id()),
    }

    ctx.finish_callback();
    Ok(ctx.outbox)
}

async fn dispatch(ctx: &mut Context, action: CallbackAction) -> AppResult<()> {
    match action {
        CallbackAction::CheckSubscription => registration::check_subscription(ctx).await,
        CallbackAction::Language(lang) => registration::choose_language(ctx, lang).await,
        CallbackAction::Role(role) => registration::choose_role(ctx, role).await,
        CallbackAction::Category(key) => orders::choose_category(ctx, &key).await,
        CallbackAction::Respond(order_id) => orders::respond(ctx, order_id).await,
        CallbackAction::ViewResponses(order_id) => orders::view_responses(ctx, order_id).await,
        CallbackAction::Contact(user_id) => profile::contact(ctx, user_id).await,
        CallbackAction::Accept {
            freelancer_id,
            order_id,
        } => orders::accept(ctx, freelancer_id, order_id).await,
        CallbackAction::CompleteOrder(order_id) => orders::complete(ctx, order_id).await,
        CallbackAction::Review { reviewed_id, order_id } => reviews::start_review(ctx, reviewed_id, order_id).await,
        CallbackAction::Rating(rating) => reviews::choose_rating(ctx, rating).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_simple_actions() {
        assert_eq!(CallbackAction::parse("check_subscription"), Some(CallbackAction::CheckSubscription));
        assert_eq!(CallbackAction::parse("lang_tm"), Some(CallbackAction::Language(Lang::Tm)));
        assert_eq!(CallbackAction::parse("role_client"), Some(CallbackAction::Role(Role::Client)));
        assert_eq!(CallbackAction::parse("respond_12"), Some(CallbackAction::Respond(12)));
        assert_eq!(CallbackAction::parse("contact_-5"), Some(CallbackAction::Contact(-5)));
        assert_eq!(CallbackAction::parse("rating_4"), Some(CallbackAction::Rating(4)));
    }

    #[test]
    fn category_keeps_full_key() {
        assert_eq!(
            CallbackAction::parse("category_web_development"),
            Some(CallbackAction::Category("web_development".to_string()))
        );
        assert_eq!(CallbackAction::parse("category_"), None);
    }

    #[test]
    fn parses_multi_word_prefixes() {
        assert_eq!(CallbackAction::parse("view_responses_3"), Some(CallbackAction::ViewResponses(3)));
        assert_eq!(CallbackAction::parse("complete_order_8"), Some(CallbackAction::CompleteOrder(8)));
    }

    #[test]
    fn parses_id_pairs() {
        assert_eq!(
            CallbackAction::parse("accept_77_3"),
            Some(CallbackAction::Accept {
                freelancer_id: 77,
                order_id: 3
            })
        );
        assert_eq!(
            CallbackAction::parse("review_9_4"),
            Some(CallbackAction::Review {
                reviewed_id: 9,
                order_id: 4
            })
        );
        assert_eq!(CallbackAction::parse("accept_77"), None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(CallbackAction::parse(""), None);
        assert_eq!(CallbackAction::parse("lang_en"), None);
        assert_eq!(CallbackAction::parse("role_admin"), None);
        assert_eq!(CallbackAction::parse("rating_6"), None);
        assert_eq!(CallbackAction::parse("respond_abc"), None);
        assert_eq!(CallbackAction::parse("unknown"), None);
    }
}
