use std::collections::HashMap;

use fluent_templates::{
    fluent_bundle::{FluentArgs, FluentValue},
    static_loader, Loader,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use unic_langid::LanguageIdentifier;

static_loader! {
    static LOCALES = {
        locales: "./locales",
        fallback_language: "ru",
    };
}

static RU: Lazy<LanguageIdentifier> = Lazy::new(|| "ru".parse().unwrap_or_default());
static TK: Lazy<LanguageIdentifier> = Lazy::new(|| "tk".parse().unwrap_or_default());

/// Languages the bot speaks.
///
/// The wire code (callback data, user records) for Turkmen is `tm`; the Fluent
/// locale directory uses the ISO code `tk`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ru,
    Tm,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::Tm => "tm",
        }
    }

    pub fn langid(self) -> &'static LanguageIdentifier {
        match self {
            Lang::Ru => &RU,
            Lang::Tm => &TK,
        }
    }

    /// Maps a Telegram `language_code` (e.g. `ru-RU`, `tk`) to a supported language.
    pub fn from_telegram_code(code: &str) -> Option<Self> {
        let base = code.split('-').next().unwrap_or(code).to_lowercase();
        match base.as_str() {
            "ru" => Some(Lang::Ru),
            "tk" | "tm" => Some(Lang::Tm),
            _ => None,
        }
    }
}

/// Order categories, in the order they are offered on the keyboard.
pub const CATEGORIES: &[&str] = &[
    "web_development",
    "mobile_development",
    "design",
    "writing",
    "translation",
    "marketing",
    "video",
    "other",
];

pub fn is_known_category(key: &str) -> bool {
    CATEGORIES.contains(&key)
}

/// Localized category name; unknown keys are shown as-is.
pub fn category_name(lang: Lang, key: &str) -> String {
    if is_known_category(key) {
        t(lang, &format!("category.{}", key))
    } else {
        key.to_string()
    }
}

/// Returns a localized string for the given key.
/// Converts literal `\n` sequences to actual newlines for proper Telegram formatting.
pub fn t(lang: Lang, key: &str) -> String {
    let text = LOCALES
        .lookup(lang.langid(), key)
        .unwrap_or_else(|| LOCALES.lookup(&RU, key).unwrap_or_else(|| key.to_string()));
    text.replace("\\n", "\n")
}

/// Returns a localized string with arguments for interpolation.
/// Converts literal `\n` sequences to actual newlines for proper Telegram formatting.
pub fn t_args(lang: Lang, key: &str, args: &FluentArgs) -> String {
    let args_map: HashMap<String, FluentValue> = args.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();

    let text = LOCALES.lookup_with_args(lang.langid(), key, &args_map).unwrap_or_else(|| {
        LOCALES
            .lookup_with_args(&RU, key, &args_map)
            .unwrap_or_else(|| key.to_string())
    });
    // Fluent wraps placeables in FSI/PDI isolation marks; Telegram renders them as junk
    text.replace("\\n", "\n").replace(['\u{2068}', '\u{2069}'], "")
}

/// Shorthand for [`t_args`] with string arguments.
pub fn tr(lang: Lang, key: &str, pairs: &[(&'static str, String)]) -> String {
    let mut args = FluentArgs::new();
    for (name, value) in pairs {
        args.set(*name, value.clone());
    }
    t_args(lang, key, &args)
}

/// True if `text` equals the catalog entry `key` in any supported language.
/// Used to recognise reply-keyboard buttons regardless of the user's language.
pub fn matches_any(text: &str, key: &str) -> bool {
    use strum::IntoEnumIterator;
    Lang::iter().any(|lang| t(lang, key) == text)
}
