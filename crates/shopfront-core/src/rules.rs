//! # Rule Registry
//!
//! The built-in validation rules as pure functions.
//!
//! Every rule has the shape `(value, locale) -> message`, where the empty
//! string means the value passed. Rules never panic and never return
//! errors; a failure is a localized, user-facing message.
//!
//! ## Rule Inventory
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rule        fails when                         parametrized            │
//! │  ─────────   ──────────────────────────────     ────────────            │
//! │  required    value is empty                     no                      │
//! │  email       value is not local@domain.tld      no                      │
//! │  minLength   char count below the bound         yes (bound)             │
//! │  maxLength   char count above the bound         yes (bound)             │
//! │  match       value ≠ the named field's value    yes (field name)        │
//! │  accepted    value is empty (unchecked box)     no                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::locale::{messages, Locale};
use crate::resolver::FormValues;

/// Fails iff the value is empty.
pub fn required(value: &str, locale: Locale) -> String {
    if value.is_empty() {
        messages(locale).required.to_string()
    } else {
        String::new()
    }
}

/// Fails unless the value looks like `local-part@domain.tld`.
///
/// The accepted shape is: one or more non-whitespace, non-`@` characters,
/// an `@`, then a domain that contains a dot with at least one character
/// on each side. Deliberately permissive; the server owns the final word.
pub fn email(value: &str, locale: Locale) -> String {
    if is_email(value) {
        String::new()
    } else {
        messages(locale).email.to_string()
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // A dot that is neither the first nor the last character of the domain.
    domain
        .bytes()
        .enumerate()
        .any(|(i, b)| b == b'.' && i > 0 && i + 1 < domain.len())
}

/// Fails when the value is shorter than `min` characters.
pub fn min_length(min: usize, value: &str, locale: Locale) -> String {
    if value.chars().count() >= min {
        String::new()
    } else {
        (messages(locale).min_length)(min)
    }
}

/// Fails when the value is longer than `max` characters.
pub fn max_length(max: usize, value: &str, locale: Locale) -> String {
    if value.chars().count() <= max {
        String::new()
    } else {
        (messages(locale).max_length)(max)
    }
}

/// Cross-field equality: fails when the value differs from the named
/// field's current value. A missing field compares as empty.
pub fn matches(other: &str, value: &str, form: &FormValues, locale: Locale) -> String {
    let other_value = form.get(other).map(String::as_str).unwrap_or("");
    if value == other_value {
        String::new()
    } else {
        messages(locale).matches.to_string()
    }
}

/// Fails iff the value is empty (an unchecked consent box).
pub fn accepted(value: &str, locale: Locale) -> String {
    if value.is_empty() {
        messages(locale).accepted.to_string()
    } else {
        String::new()
    }
}

/// The message produced by a validator whose rule name the registry does
/// not know (configuration defect, degraded rather than fatal).
pub fn unknown_rule(locale: Locale) -> String {
    messages(locale).unknown_rule.to_string()
}
