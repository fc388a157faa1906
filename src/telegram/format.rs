//! HTML message bodies for orders, profiles and reviews
//!
//! User-supplied text is always passed through [`escape_html`] since every
//! message is sent with `parse_mode = HTML`.

use crate::core::config;
use crate::core::utils::{escape_html, format_price, truncate_text};
use crate::i18n::{category_name, t, Lang};
use crate::storage::models::{Order, Role, User};

/// Order card shown in lists and notifications.
pub fn order_text(order: &Order, lang: Lang) -> String {
    format!(
        "{emoji} <b>{order_label} #{id}</b>\n\n\
         📝 <b>{title_label}:</b> {title}\n\
         📋 <b>{description_label}:</b> {description}\n\
         💰 <b>{budget_label}:</b> {budget} TMT\n\
         ⏰ <b>{deadline_label}:</b> {days} {days_label}\n\
         🏷️ <b>{category_label}:</b> {category}\n\
         📅 <b>{created_label}:</b> {created}",
        emoji = order.status.emoji(),
        order_label = t(lang, "label.order"),
        id = order.id,
        title_label = t(lang, "label.title"),
        title = escape_html(&order.title),
        description_label = t(lang, "label.description"),
        description = escape_html(&truncate_text(&order.description, config::text::DESCRIPTION_PREVIEW)),
        budget_label = t(lang, "label.budget"),
        budget = format_price(order.budget),
        deadline_label = t(lang, "label.deadline"),
        days = order.deadline_days,
        days_label = t(lang, "label.days"),
        category_label = t(lang, "label.category"),
        category = category_name(lang, &order.category),
        created_label = t(lang, "label.created"),
        created = order.created_at.format("%d.%m.%Y %H:%M"),
    )
}

pub fn role_name(role: Role, lang: Lang) -> String {
    match role {
        Role::Freelancer => t(lang, "role.freelancer"),
        Role::Client => t(lang, "role.client"),
    }
}

/// Name shown to other users: the registered name, else the Telegram first name.
pub fn display_name(user: &User) -> &str {
    if user.profile.name.trim().is_empty() {
        &user.first_name
    } else {
        &user.profile.name
    }
}

fn or_not_set(value: &str, lang: Lang) -> String {
    if value.trim().is_empty() {
        t(lang, "label.not_set")
    } else {
        escape_html(value)
    }
}

/// Profile card with rating summary.
pub fn profile_text(user: &User, average_rating: f64, review_count: usize, lang: Lang) -> String {
    format!(
        "👤 <b>{profile_label}</b>\n\n\
         📛 <b>{name_label}:</b> {name}\n\
         🎭 <b>{role_label}:</b> {role}\n\
         💼 <b>{skills_label}:</b> {skills}\n\
         📝 <b>{description_label}:</b> {description}\n\
         📞 <b>{contact_label}:</b> {contact}\n\
         ⭐ <b>{rating_label}:</b> {rating:.1}/5.0 ({count} {reviews_label})",
        profile_label = t(lang, "label.profile"),
        name_label = t(lang, "label.name"),
        name = escape_html(display_name(user)),
        role_label = t(lang, "label.role"),
        role = role_name(user.role, lang),
        skills_label = t(lang, "label.skills"),
        skills = or_not_set(&user.profile.skills, lang),
        description_label = t(lang, "label.description"),
        description = or_not_set(&user.profile.description, lang),
        contact_label = t(lang, "label.contact"),
        contact = or_not_set(&user.profile.contact, lang),
        rating_label = t(lang, "label.rating"),
        rating = average_rating,
        count = review_count,
        reviews_label = t(lang, "label.reviews"),
    )
}

/// One entry in the reviews list.
pub fn review_entry(rating: u8, reviewer_name: &str, comment: &str, date: &str) -> String {
    format!(
        "⭐ {}/5 - {}\n💬 {}\n📅 {}",
        rating,
        escape_html(reviewer_name),
        escape_html(comment),
        date
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::{OrderStatus, Profile};
    use chrono::{TimeZone, Utc};

    fn order() -> Order {
        Order {
            id: 7,
            client_id: 1,
            title: "Logo <b>now</b>".to_string(),
            description: "x".repeat(150),
            category: "design".to_string(),
            budget: 250.5,
            deadline_days: 3,
            contact: "@client".to_string(),
            status: OrderStatus::Active,
            freelancer_id: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap(),
            accepted_at: None,
            completed_at: None,
        }
    }

    fn user(profile_name: &str) -> User {
        User {
            id: 5,
            first_name: "Aman".to_string(),
            username: None,
            language: Lang::Ru,
            role: Role::Freelancer,
            profile: Profile {
                name: profile_name.to_string(),
                skills: "Rust".to_string(),
                description: String::new(),
                contact: "@aman".to_string(),
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn order_card_escapes_and_truncates() {
        let text = order_text(&order(), Lang::Ru);
        assert!(text.starts_with("🟢 <b>Заказ #7</b>"));
        assert!(text.contains("Logo &lt;b&gt;now&lt;/b&gt;"));
        assert!(text.contains(&format!("{}...", "x".repeat(100))));
        assert!(text.contains("250.5 TMT"));
        assert!(text.contains("3 дней"));
        assert!(text.contains("🎨 Дизайн"));
        assert!(text.ends_with("09.03.2024 14:05"));
    }

    #[test]
    fn profile_card_fills_missing_fields() {
        let text = profile_text(&user("Aman D."), 4.25, 4, Lang::Ru);
        assert!(text.contains("Aman D."));
        assert!(text.contains("Фрилансер"));
        assert!(text.contains("Не указано"));
        assert!(text.contains("4.2/5.0 (4 отзывов)") || text.contains("4.3/5.0 (4 отзывов)"));
    }

    #[test]
    fn display_name_prefers_profile_name() {
        assert_eq!(display_name(&user("Aman D.")), "Aman D.");
        assert_eq!(display_name(&user("  ")), "Aman");
    }

    #[test]
    fn review_entry_layout() {
        assert_eq!(
            review_entry(5, "Maya", "Great & fast", "01.02.2024"),
            "⭐ 5/5 - Maya\n💬 Great &amp; fast\n📅 01.02.2024"
        );
    }
}
