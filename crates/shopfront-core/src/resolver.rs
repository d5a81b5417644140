//! # Validator Resolver
//!
//! Turns a field's declarative rule list into concrete validators.
//!
//! A [`RuleSpec`] is a tagged union rather than a duck-typed value: a rule
//! is a name, a name with an argument, or an explicit predicate. Cross-field
//! predicates declare the fields they depend on up front; nothing inspects
//! function bodies at runtime.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RuleSpec                       Validator                               │
//! │  ──────────────────────────     ──────────────────────────────────      │
//! │  Named("required")         ──►  registry lookup, single-field           │
//! │  Parametrized("minLength", │                                            │
//! │                Length(6))  ──►  bound baked into the closure            │
//! │  Parametrized("match",     │                                            │
//! │               Field("pw")) ──►  cross-field, depends_on = ["pw"]        │
//! │  Predicate { .. }          ──►  used as declared                        │
//! │  Named("no-such-rule")     ──►  always fails with a generic message     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution is total: an unknown rule name (or a name/argument mismatch)
//! yields a validator that reports a localized lookup-failure message.
//! A misconfigured form stays usable; it never panics.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::locale::Locale;
use crate::rules;

/// A snapshot of every field's current value, keyed by field name.
/// Cross-field validators read their counterpart's value from here.
pub type FormValues = HashMap<String, String>;

/// The function shape shared by every resolved check.
type Check = Arc<dyn Fn(&str, &FormValues, Locale) -> String + Send + Sync>;

/// The argument of a parametrized rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleArg {
    /// A numeric bound (`minLength`, `maxLength`).
    Length(usize),

    /// The name of another field (`match`).
    Field(String),
}

/// A declarative description of one validation check.
///
/// Immutable once declared for a field; resolution is pure and
/// deterministic, so the same specifier list always yields functionally
/// equivalent validators.
#[derive(Clone)]
pub enum RuleSpec {
    /// An unparametrized registry rule, e.g. `"required"`.
    Named(String),

    /// A registry builder with its argument, e.g. `("minLength", Length(6))`.
    Parametrized(String, RuleArg),

    /// An arbitrary predicate with an explicit cross-field dependency list.
    /// An empty `depends_on` marks a single-field predicate.
    Predicate {
        check: Check,
        depends_on: Vec<String>,
    },
}

impl RuleSpec {
    /// The `required` rule.
    pub fn required() -> Self {
        RuleSpec::Named("required".to_string())
    }

    /// The `email` rule.
    pub fn email() -> Self {
        RuleSpec::Named("email".to_string())
    }

    /// The `accepted` rule (consent checkboxes).
    pub fn accepted() -> Self {
        RuleSpec::Named("accepted".to_string())
    }

    /// The `minLength` rule with its bound.
    pub fn min_length(min: usize) -> Self {
        RuleSpec::Parametrized("minLength".to_string(), RuleArg::Length(min))
    }

    /// The `maxLength` rule with its bound.
    pub fn max_length(max: usize) -> Self {
        RuleSpec::Parametrized("maxLength".to_string(), RuleArg::Length(max))
    }

    /// The cross-field `match` rule against another field.
    pub fn matches(other: impl Into<String>) -> Self {
        RuleSpec::Parametrized("match".to_string(), RuleArg::Field(other.into()))
    }

    /// A custom predicate. `depends_on` names the fields whose changes must
    /// re-trigger this check; leave it empty for a single-field predicate.
    pub fn predicate<F>(depends_on: Vec<String>, check: F) -> Self
    where
        F: Fn(&str, &FormValues, Locale) -> String + Send + Sync + 'static,
    {
        RuleSpec::Predicate {
            check: Arc::new(check),
            depends_on,
        }
    }
}

impl fmt::Debug for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSpec::Named(name) => write!(f, "Named({name:?})"),
            RuleSpec::Parametrized(name, arg) => write!(f, "Parametrized({name:?}, {arg:?})"),
            RuleSpec::Predicate { depends_on, .. } => {
                write!(f, "Predicate {{ depends_on: {depends_on:?} }}")
            }
        }
    }
}

/// A concrete, ready-to-run validator.
///
/// The dependency list is discoverable so the form engine can build its
/// re-validation table at declaration time.
#[derive(Clone)]
pub struct Validator {
    name: String,
    depends_on: Vec<String>,
    check: Check,
}

impl Validator {
    /// The rule name this validator resolved from (diagnostics only).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields whose changes must re-trigger this validator.
    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    /// Whether this validator reads another field's value.
    pub fn is_cross_field(&self) -> bool {
        !self.depends_on.is_empty()
    }

    /// Runs the check. Empty string means the value passed.
    pub fn run(&self, value: &str, form: &FormValues, locale: Locale) -> String {
        (self.check)(value, form, locale)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("depends_on", &self.depends_on)
            .finish_non_exhaustive()
    }
}

/// Resolves a field's rule list into validators, in declaration order.
pub fn resolve(specs: &[RuleSpec]) -> Vec<Validator> {
    specs.iter().map(resolve_one).collect()
}

fn resolve_one(spec: &RuleSpec) -> Validator {
    match spec {
        RuleSpec::Named(name) => match name.as_str() {
            "required" => single(name, |v, _, loc| rules::required(v, loc)),
            "email" => single(name, |v, _, loc| rules::email(v, loc)),
            "accepted" => single(name, |v, _, loc| rules::accepted(v, loc)),
            _ => unknown(name),
        },
        RuleSpec::Parametrized(name, arg) => match (name.as_str(), arg) {
            ("minLength", RuleArg::Length(min)) => {
                let min = *min;
                single(name, move |v, _, loc| rules::min_length(min, v, loc))
            }
            ("maxLength", RuleArg::Length(max)) => {
                let max = *max;
                single(name, move |v, _, loc| rules::max_length(max, v, loc))
            }
            ("match", RuleArg::Field(other)) => {
                let target = other.clone();
                Validator {
                    name: name.clone(),
                    depends_on: vec![other.clone()],
                    check: Arc::new(move |v, form, loc| rules::matches(&target, v, form, loc)),
                }
            }
            _ => unknown(name),
        },
        RuleSpec::Predicate { check, depends_on } => Validator {
            name: "predicate".to_string(),
            depends_on: depends_on.clone(),
            check: Arc::clone(check),
        },
    }
}

fn single<F>(name: &str, check: F) -> Validator
where
    F: Fn(&str, &FormValues, Locale) -> String + Send + Sync + 'static,
{
    Validator {
        name: name.to_string(),
        depends_on: Vec::new(),
        check: Arc::new(check),
    }
}

/// A registry miss degrades to a validator that always reports the
/// localized lookup-failure message.
fn unknown(name: &str) -> Validator {
    tracing::warn!(rule = name, "unknown validation rule, degrading to generic failure");
    Validator {
        name: name.to_string(),
        depends_on: Vec::new(),
        check: Arc::new(|_, _, loc| rules::unknown_rule(loc)),
    }
}
