//! Validation rules for submitted form values.
//!
//! Each rule is a named predicate over `(attribute, value, parameters,
//! context)`. The host validation engine decides which rules apply to which
//! attributes and how failures are reported; this module only supplies the
//! predicates, their failure messages, and a [`RuleSet`] to look them up by
//! name.
//!
//! All state a rule needs is passed in through a [`RuleContext`]: the
//! submitted form, an optional [`PresenceVerifier`] for uniqueness checks,
//! and a caller-owned [`ProcessedEntities`] cache that the `data_url` rule
//! fills with the values it parsed.
//!
//! ```rust
//! # use data_uri::rules::*;
//! let rules = RuleSet::standard();
//! let form = FormContext::new().with_field("avatar", "data:image/png;base64,aGVsbG8");
//! let mut processed = ProcessedEntities::new();
//! let mut context = RuleContext::new(&form, &mut processed);
//!
//! let value = form.value("avatar").cloned().unwrap_or_default();
//! let valid = rules
//!     .validate("data_url", "avatar", &value, &["image", "base64"], &mut context)
//!     .unwrap();
//! assert!(valid);
//! assert_eq!(processed.get("avatar").unwrap().payload(), b"hello");
//! ```

use indexmap::IndexMap;
use thiserror::Error;

use crate::DataUri;

mod value;
pub use value::{ FieldValue, FormContext, is_present, is_present_allow_empty_collection };

mod presence;
pub use presence::{ RequiredOrEmptyArray, RequiredXor };

mod datetime;
pub use datetime::{ Datetime, parse_datetime };

mod unique;
pub use unique::{ DynamicUnique, PresenceVerifier, UniqueQuery };

mod data_url;
pub use data_url::{ DataUrl, matches_media_type };

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Validation rule {rule} requires at least {count} parameters")]
    MissingParameters { rule: String, count: usize },
    #[error("Unknown validation rule '{0}'")]
    UnknownRule(String),
    #[error("Validation rule {0} requires a presence verifier")]
    MissingVerifier(String),
    #[error("Presence verifier failed: {0}")]
    Verifier(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Data URIs parsed by the `data_url` rule, keyed by attribute name.
///
/// Owned by the caller and passed into each validation call, so that values
/// parsed during validation can be used afterwards without parsing again.
#[derive(Debug, Clone, Default)]
pub struct ProcessedEntities {
    entities: IndexMap<String, DataUri>,
}

impl ProcessedEntities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `uri` for `attribute`, replacing any earlier value.
    pub fn insert(&mut self, attribute: impl Into<String>, uri: DataUri) -> Option<DataUri> {
        self.entities.insert(attribute.into(), uri)
    }

    pub fn get(&self, attribute: &str) -> Option<&DataUri> {
        self.entities.get(attribute)
    }

    pub fn remove(&mut self, attribute: &str) -> Option<DataUri> {
        self.entities.shift_remove(attribute)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataUri)> {
        self.entities.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> IndexMap<String, DataUri> {
        self.entities
    }
}

/// Everything a rule may consult or update during one validation call.
pub struct RuleContext<'a> {
    pub form: &'a FormContext,
    pub verifier: Option<&'a dyn PresenceVerifier>,
    pub processed: &'a mut ProcessedEntities,
}

impl<'a> RuleContext<'a> {
    pub fn new(form: &'a FormContext, processed: &'a mut ProcessedEntities) -> Self {
        Self { form, verifier: None, processed }
    }

    pub fn with_verifier(mut self, verifier: &'a dyn PresenceVerifier) -> Self {
        self.verifier = Some(verifier);
        self
    }
}

/// A named validation predicate.
pub trait Rule: Send + Sync {
    fn name(&self) -> &str;

    /// Implicit rules run even when the value is absent.
    fn implicit(&self) -> bool {
        false
    }

    /// Failure message template. `:attribute` is replaced by the attribute
    /// name and `:values` by the rule parameters.
    fn message(&self) -> Option<&str> {
        None
    }

    fn validate(
        &self,
        attribute: &str,
        value: &FieldValue,
        parameters: &[&str],
        context: &mut RuleContext<'_>,
    ) -> Result<bool>;
}

/// Rules registered by name.
#[derive(Default)]
pub struct RuleSet {
    rules: IndexMap<String, Box<dyn Rule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding every built-in rule: `required_or_empty_array`,
    /// `datetime`, `required_xor`, `dynamic_unique`, and `data_url`.
    pub fn standard() -> Self {
        let mut rules = Self::new();
        rules.register(RequiredOrEmptyArray);
        rules.register(Datetime);
        rules.register(RequiredXor);
        rules.register(DynamicUnique);
        rules.register(DataUrl);
        rules
    }

    /// Adds `rule`, replacing any rule already registered under its name.
    pub fn register(&mut self, rule: impl Rule + 'static) {
        self.rules.insert(rule.name().to_string(), Box::new(rule));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.get(name).map(|rule| rule.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Runs the rule registered as `name`.
    ///
    /// Rules that are not implicit pass without running when the value is
    /// absent.
    pub fn validate(
        &self,
        name: &str,
        attribute: &str,
        value: &FieldValue,
        parameters: &[&str],
        context: &mut RuleContext<'_>,
    ) -> Result<bool> {
        let rule = self.get(name).ok_or_else(|| Error::UnknownRule(name.to_string()))?;
        if !rule.implicit() && !is_present(value) {
            tracing::trace!(rule = name, attribute, "value absent, skipping rule");
            return Ok(true);
        }
        let valid = rule.validate(attribute, value, parameters, context)?;
        if !valid {
            tracing::debug!(rule = name, attribute, "validation rule rejected value");
        }
        Ok(valid)
    }

    /// The rendered failure message for `name`, if the rule has one.
    pub fn message_for(&self, name: &str, attribute: &str, parameters: &[&str]) -> Option<String> {
        self.get(name)?
            .message()
            .map(|template| render_message(template, attribute, parameters))
    }
}

/// Fills in the `:attribute` and `:values` placeholders of a message
/// template. Underscores in names are shown as spaces.
pub fn render_message(template: &str, attribute: &str, parameters: &[&str]) -> String {
    let values = parameters
        .iter()
        .map(|p| display_name(p))
        .collect::<Vec<_>>()
        .join(", ");
    template
        .replace(":attribute", &display_name(attribute))
        .replace(":values", &values)
}

fn display_name(name: &str) -> String {
    name.replace('_', " ")
}

pub(crate) fn require_parameters(rule: &str, parameters: &[&str], count: usize) -> Result<()> {
    if parameters.len() < count {
        return Err(Error::MissingParameters { rule: rule.to_string(), count });
    }
    Ok(())
}
