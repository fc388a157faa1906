//! Inline and reply keyboards
//!
//! Callback data produced here is parsed back by
//! [`CallbackAction::parse`](crate::telegram::handlers::callbacks::CallbackAction::parse).

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::i18n::{self, t, tr, Lang};
use crate::storage::models::Role;
use crate::telegram::cb;

pub fn language_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        cb(t(Lang::Ru, "language.ru"), "lang_ru"),
        cb(t(Lang::Ru, "language.tm"), "lang_tm"),
    ]])
}

pub fn role_keyboard(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![cb(t(lang, "role.freelancer_button"), "role_freelancer")],
        vec![cb(t(lang, "role.client_button"), "role_client")],
    ])
}

/// Persistent reply keyboard with the role's actions.
pub fn main_menu_keyboard(role: Role, lang: Lang, is_admin: bool) -> KeyboardMarkup {
    let first_row = match role {
        Role::Freelancer => vec![
            KeyboardButton::new(t(lang, "btn.view_orders")),
            KeyboardButton::new(t(lang, "btn.my_responses")),
        ],
        Role::Client => vec![
            KeyboardButton::new(t(lang, "btn.create_order")),
            KeyboardButton::new(t(lang, "btn.my_orders")),
        ],
    };

    let mut rows = vec![
        first_row,
        vec![
            KeyboardButton::new(t(lang, "btn.profile")),
            KeyboardButton::new(t(lang, "btn.reviews")),
        ],
        vec![KeyboardButton::new(t(lang, "btn.help"))],
    ];
    if is_admin {
        rows.push(vec![KeyboardButton::new(t(lang, "btn.admin_panel"))]);
    }

    KeyboardMarkup::new(rows).resize_keyboard()
}

pub fn subscription_keyboard(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![cb(t(lang, "start.check_subscription"), "check_subscription")]])
}

/// Categories two per row.
pub fn categories_keyboard(lang: Lang) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = i18n::CATEGORIES
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|key| cb(i18n::category_name(lang, key), format!("category_{}", key)))
                .collect()
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

pub fn respond_keyboard(order_id: u64, lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![cb(t(lang, "btn.respond"), format!("respond_{}", order_id))]])
}

pub fn back_keyboard(lang: Lang) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(t(lang, "btn.back"))]]).resize_keyboard()
}

pub fn rating_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![(1..=5)
        .map(|i| cb(format!("{}⭐", i), format!("rating_{}", i)))
        .collect::<Vec<_>>()])
}

/// Buttons under a response in "view responses".
pub fn response_actions_keyboard(freelancer_id: i64, order_id: u64, can_select: bool, lang: Lang) -> InlineKeyboardMarkup {
    let mut row = vec![cb(t(lang, "btn.contact"), format!("contact_{}", freelancer_id))];
    if can_select {
        row.push(cb(
            t(lang, "btn.select_freelancer"),
            format!("accept_{}_{}", freelancer_id, order_id),
        ));
    }
    InlineKeyboardMarkup::new(vec![row])
}

/// Buttons under a client's own order, if any apply.
pub fn my_order_keyboard(order_id: u64, responses: usize, in_progress: bool, lang: Lang) -> Option<InlineKeyboardMarkup> {
    let mut rows = Vec::new();
    if responses > 0 {
        rows.push(vec![cb(
            tr(lang, "btn.view_responses", &[("count", responses.to_string())]),
            format!("view_responses_{}", order_id),
        )]);
    }
    if in_progress {
        rows.push(vec![cb(t(lang, "btn.complete_order"), format!("complete_order_{}", order_id))]);
    }
    (!rows.is_empty()).then(|| InlineKeyboardMarkup::new(rows))
}

/// "Complete" button for the freelancer assigned to an order.
pub fn complete_order_keyboard(order_id: u64, lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![cb(
        t(lang, "btn.complete_order"),
        format!("complete_order_{}", order_id),
    )]])
}

/// Review button for the counterpart of a completed order.
pub fn review_keyboard(reviewed_id: i64, order_id: u64, reviewed_role: Role, lang: Lang) -> InlineKeyboardMarkup {
    let key = match reviewed_role {
        Role::Freelancer => "btn.review_freelancer",
        Role::Client => "btn.review_client",
    };
    InlineKeyboardMarkup::new(vec![vec![cb(t(lang, key), format!("review_{}_{}", reviewed_id, order_id))]])
}
