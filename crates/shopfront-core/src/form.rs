//! # Field Validation Engine
//!
//! Per-field and whole-form validation orchestration.
//!
//! ## Field Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Field Validation Lifecycle                           │
//! │                                                                         │
//! │  pristine ──touch()──► touched ──input──► validated on every change     │
//! │     │                                                                   │
//! │     └── input while pristine: value stored, no error shown yet          │
//! │                                                                         │
//! │  submit() sets the session-wide `submitted` flag: from then on every    │
//! │  value change validates immediately, touched or not.                    │
//! │                                                                         │
//! │  Cross-field rules re-run through the dependency table: changing        │
//! │  `password` re-validates `confirmPassword` even if it was never         │
//! │  touched.                                                               │
//! │                                                                         │
//! │  set_locale() re-runs everything so displayed messages switch           │
//! │  language without new input.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No operation here returns an error: an undeclared field name is a logged
//! no-op, and a broken rule reference surfaces as a visible message
//! (see [`crate::resolver`]). The form stays interactive no matter what.

use tracing::warn;

use crate::locale::Locale;
use crate::resolver::{resolve, FormValues, RuleSpec, Validator};

/// The mutable state of one declared field.
#[derive(Debug, Clone, Default)]
pub struct FieldState {
    /// Current input value (string-valued for these forms).
    pub value: String,

    /// Current validation message; empty means the field is valid.
    pub error: String,

    /// Whether the user has interacted with this field.
    pub touched: bool,
}

/// A field declaration: its name and declarative rule list.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    name: String,
    rules: Vec<RuleSpec>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, rules: Vec<RuleSpec>) -> Self {
        FieldDecl {
            name: name.into(),
            rules,
        }
    }
}

/// One declared field with its resolved validators.
#[derive(Debug)]
struct Field {
    name: String,
    state: FieldState,
    /// Declaration order, short-circuit at the first failure.
    validators: Vec<Validator>,
    /// Union of the validators' dependency lists, built once at
    /// declaration time. Any change to a named field re-validates this one.
    depends_on: Vec<String>,
}

/// A form session: declared fields (in declaration order), the active
/// locale, and the session-wide `submitted` flag.
///
/// Aggregate invariant: `is_valid() ⇔ every field's error is empty`.
#[derive(Debug)]
pub struct FormSession {
    fields: Vec<Field>,
    submitted: bool,
    locale: Locale,
}

impl FormSession {
    /// Declares a form. Field order is meaningful: `validate_all` walks
    /// fields in this order, and each field's rules run in their declared
    /// order.
    pub fn new(decls: Vec<FieldDecl>, locale: Locale) -> Self {
        let fields = decls
            .into_iter()
            .map(|decl| {
                let validators = resolve(&decl.rules);
                let mut depends_on: Vec<String> = Vec::new();
                for validator in &validators {
                    for dep in validator.depends_on() {
                        if !depends_on.contains(dep) {
                            depends_on.push(dep.clone());
                        }
                    }
                }
                Field {
                    name: decl.name,
                    state: FieldState::default(),
                    validators,
                    depends_on,
                }
            })
            .collect();

        FormSession {
            fields,
            submitted: false,
            locale,
        }
    }

    /// The active locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Whether the form has been submitted at least once.
    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// Looks up a field's state.
    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.state)
    }

    /// A field's current value; empty for undeclared fields.
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(|s| s.value.as_str()).unwrap_or("")
    }

    /// A field's current error; empty means valid (or undeclared).
    pub fn error(&self, name: &str) -> &str {
        self.field(name).map(|s| s.error.as_str()).unwrap_or("")
    }

    /// A snapshot of every field's current value.
    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.state.value.clone()))
            .collect()
    }

    /// True iff every field's error is empty. Computed fresh on each call,
    /// never cached.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|f| f.state.error.is_empty())
    }

    /// Stores a new value for `name` and re-validates what the change can
    /// affect: the field itself when it is touched (or the form was
    /// submitted), plus every field whose dependency list names it,
    /// regardless of whether that dependent field was ever touched.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        let Some(field) = self.fields.iter_mut().find(|f| f.name == name) else {
            warn!(field = name, "set_value on undeclared field");
            return;
        };
        field.state.value = value.into();
        let validate_self = field.state.touched || self.submitted;

        if validate_self {
            self.validate_field(name);
        }

        let dependents: Vec<String> = self
            .fields
            .iter()
            .filter(|f| f.name != name && f.depends_on.iter().any(|d| d == name))
            .map(|f| f.name.clone())
            .collect();
        for dependent in dependents {
            self.validate_field(&dependent);
        }
    }

    /// Marks a field as interacted-with and validates it immediately.
    pub fn touch(&mut self, name: &str) {
        let Some(field) = self.fields.iter_mut().find(|f| f.name == name) else {
            warn!(field = name, "touch on undeclared field");
            return;
        };
        field.state.touched = true;
        self.validate_field(name);
    }

    /// Runs a field's validators in declaration order, short-circuiting at
    /// the first failure, and stores the resulting message (empty = valid).
    pub fn validate_field(&mut self, name: &str) {
        let snapshot = self.values();
        let locale = self.locale;
        let Some(field) = self.fields.iter_mut().find(|f| f.name == name) else {
            warn!(field = name, "validate_field on undeclared field");
            return;
        };
        field.state.error =
            first_failure(&field.validators, &field.state.value, &snapshot, locale);
    }

    /// Validates every field, in declaration order.
    pub fn validate_all(&mut self) {
        let snapshot = self.values();
        let locale = self.locale;
        for field in &mut self.fields {
            field.state.error =
                first_failure(&field.validators, &field.state.value, &snapshot, locale);
        }
    }

    /// Switches the active locale and unconditionally re-validates, so any
    /// displayed message changes language without requiring new input.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        self.validate_all();
    }

    /// Marks the session submitted and validates everything. The callback
    /// runs with a value snapshot only when the whole form is valid;
    /// otherwise errors stay visible and the callback is skipped.
    /// Returns whether the callback ran.
    pub fn submit<F>(&mut self, callback: F) -> bool
    where
        F: FnOnce(FormValues),
    {
        self.submitted = true;
        self.validate_all();
        if !self.is_valid() {
            return false;
        }
        callback(self.values());
        true
    }
}

fn first_failure(
    validators: &[Validator],
    value: &str,
    form: &FormValues,
    locale: Locale,
) -> String {
    for validator in validators {
        let message = validator.run(value, form, locale);
        if !message.is_empty() {
            return message;
        }
    }
    String::new()
}
