//! # Locale Module
//!
//! Locales and the per-locale validation message tables.
//!
//! The active locale is always an explicit parameter; there is no
//! process-global language state. Switching locale therefore only means
//! calling back into the engine with a different [`Locale`] value, and the
//! engine re-renders every computed message (see `form::FormSession::set_locale`).

use serde::{Deserialize, Serialize};

/// A supported UI locale.
///
/// New locales are added by extending this enum and its [`Messages`] table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default)
    #[default]
    En,

    /// Russian
    Ru,
}

impl Locale {
    /// The two-letter language code, e.g. for an HTTP `Accept-Language` header.
    pub const fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }
}

/// The validation message table for one locale, keyed by rule.
///
/// Parametrized rules (`minLength`, `maxLength`) carry their bound into the
/// message, so those entries are functions of the numeric argument.
pub(crate) struct Messages {
    pub required: &'static str,
    pub email: &'static str,
    pub min_length: fn(usize) -> String,
    pub max_length: fn(usize) -> String,
    pub matches: &'static str,
    pub accepted: &'static str,
    /// Shown when a field references a rule the registry does not know.
    /// A configuration defect degrades to a visible message, never a panic.
    pub unknown_rule: &'static str,
}

static EN: Messages = Messages {
    required: "This field is required",
    email: "Invalid email",
    min_length: |len| format!("Must be at least {len} characters"),
    max_length: |len| format!("Must be at most {len} characters"),
    matches: "Password fields do not match",
    accepted: "You must accept the terms",
    unknown_rule: "Unknown validation rule",
};

static RU: Messages = Messages {
    required: "Поле обязательно",
    email: "Неверный email",
    min_length: |len| format!("Минимум {len} символов"),
    max_length: |len| format!("Максимум {len} символов"),
    matches: "Пароли не совпадают",
    accepted: "Вы должны принять условия",
    unknown_rule: "Неизвестное правило валидации",
};

/// Returns the message table for a locale.
pub(crate) fn messages(locale: Locale) -> &'static Messages {
    match locale {
        Locale::En => &EN,
        Locale::Ru => &RU,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_codes() {
        assert_eq!(Locale::En.code(), "en");
        assert_eq!(Locale::Ru.code(), "ru");
    }

    #[test]
    fn test_default_locale_is_english() {
        assert_eq!(Locale::default(), Locale::En);
    }

    #[test]
    fn test_parametrized_messages_embed_bound() {
        assert_eq!((messages(Locale::En).min_length)(6), "Must be at least 6 characters");
        assert_eq!((messages(Locale::Ru).max_length)(20), "Максимум 20 символов");
    }

    #[test]
    fn test_locale_serde_codes() {
        assert_eq!(serde_json::to_string(&Locale::Ru).unwrap(), "\"ru\"");
        let back: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(back, Locale::En);
    }
}
