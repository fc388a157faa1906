//! Inbound webhook payload
//!
//! Updates decode into teloxide's types. Kinds the bot does not handle, and
//! payloads teloxide cannot read, land in `UpdateKind::Error` instead of
//! failing the request.

use teloxide::types::ChatId;
pub use teloxide::types::{CallbackQuery, Message, Update, UpdateKind, User};

/// Store key of a Telegram user.
pub fn user_id(user: &User) -> i64 {
    ChatId::from(user.id).0
}

/// The user who triggered the update, used for rate limiting.
pub fn sender(update: &Update) -> Option<&User> {
    match &update.kind {
        UpdateKind::Message(message) => message.from.as_ref(),
        UpdateKind::CallbackQuery(query) => Some(&query.from),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_text_message() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 10,
            "message": {
                "message_id": 5,
                "date": 1700000000,
                "chat": {"id": 42, "type": "private", "first_name": "Aman"},
                "from": {"id": 42, "is_bot": false, "first_name": "Aman", "language_code": "ru"},
                "text": "/start",
                "entities": [{"offset": 0, "length": 6, "type": "bot_command"}]
            }
        }))
        .unwrap();

        assert_eq!(sender(&update).map(user_id), Some(42));
        let UpdateKind::Message(message) = update.kind else {
            panic!("expected a message");
        };
        assert_eq!(message.text(), Some("/start"));
        assert_eq!(message.chat.id.0, 42);
    }

    #[test]
    fn decodes_callback_query() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 11,
            "callback_query": {
                "id": "cb-1",
                "chat_instance": "x",
                "from": {"id": 7, "is_bot": false, "first_name": "Maya"},
                "message": {
                    "message_id": 3,
                    "date": 1700000000,
                    "chat": {"id": 7, "type": "private"},
                    "from": {"id": 1, "is_bot": true, "first_name": "FreelanceTM"},
                    "text": "Выберите язык"
                },
                "data": "lang_tm"
            }
        }))
        .unwrap();

        assert_eq!(sender(&update).map(user_id), Some(7));
        let UpdateKind::CallbackQuery(query) = update.kind else {
            panic!("expected a callback query");
        };
        assert_eq!(query.data.as_deref(), Some("lang_tm"));
        assert_eq!(query.message.as_ref().map(|m| (m.chat().id.0, m.id().0)), Some((7, 3)));
    }

    #[test]
    fn unreadable_update_kinds_still_decode() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 12,
            "edited_message": {"message_id": 1}
        }))
        .unwrap();
        assert!(sender(&update).is_none());
        assert!(matches!(update.kind, UpdateKind::Error(_)));
    }
}
