//! Raw, unvalidated policy specifications.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::PolicyError;

/// A user supplied function from status code to expiration value.
///
/// Custom resolvers are used verbatim: they are neither validated nor
/// wrapped, and may return any value the caller's [`Resolver`](crate::Resolver)
/// is typed over.
pub type CustomResolver<T = String> = Arc<dyn Fn(u16) -> T + Send + Sync>;

/// A policy as written by the user, before [`compile`](crate::compile)
/// checks it.
///
/// Mapping values are kept as [`serde_json::Value`] because configuration
/// may put anything under a key; non-string values are rejected during
/// compilation with [`PolicyError::InvalidExpirationValue`].
///
/// # Examples
///
/// ```
/// use cache_expiry::PolicySpec;
///
/// // Same expiration for every response.
/// let uniform: PolicySpec = "max-age=60".into();
///
/// // Per-status rules with a required `xxx` fallback.
/// let rules: PolicySpec = PolicySpec::rules([
///     ("404", "max-age=10"),
///     ("5xx", "no-cache"),
///     ("xxx", "max-age=3600"),
/// ]);
///
/// // Full control, no validation.
/// let custom: PolicySpec = PolicySpec::custom(|status| {
///     if status < 400 { "public" } else { "no-store" }.to_owned()
/// });
/// # let _ = (uniform, rules, custom);
/// ```
pub enum PolicySpec<T = String> {
    /// A single expiration value, equivalent to `{ "xxx": value }`.
    Default(String),
    /// Status pattern keys mapped to expiration values, in insertion order.
    Rules(IndexMap<String, Value>),
    /// A pass-through resolver function.
    Custom(CustomResolver<T>),
}

impl<T> PolicySpec<T> {
    /// Builds a mapping specification from `(pattern, value)` pairs.
    pub fn rules<I, K, V>(rules: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Rules(
            rules
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Wraps a function as a pass-through specification.
    pub fn custom<F>(resolver: F) -> Self
    where
        F: Fn(u16) -> T + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(resolver))
    }

    /// Interprets a dynamically typed value as a specification.
    ///
    /// Strings become [`Default`](Self::Default) and objects become
    /// [`Rules`](Self::Rules). Every other JSON type fails with
    /// [`PolicyError::InvalidSpecType`] naming that type.
    pub fn from_value(value: Value) -> Result<Self, PolicyError> {
        match value {
            Value::String(default) => Ok(Self::Default(default)),
            Value::Object(rules) => Ok(Self::Rules(rules.into_iter().collect())),
            other => Err(PolicyError::InvalidSpecType(json_type_name(&other))),
        }
    }
}

/// Name of a JSON value's type, as reported in [`PolicyError::InvalidSpecType`].
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<T> From<&str> for PolicySpec<T> {
    fn from(default: &str) -> Self {
        Self::Default(default.to_owned())
    }
}

impl<T> From<String> for PolicySpec<T> {
    fn from(default: String) -> Self {
        Self::Default(default)
    }
}

impl<T> From<CustomResolver<T>> for PolicySpec<T> {
    fn from(resolver: CustomResolver<T>) -> Self {
        Self::Custom(resolver)
    }
}

impl<T> Clone for PolicySpec<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Default(default) => Self::Default(default.clone()),
            Self::Rules(rules) => Self::Rules(rules.clone()),
            Self::Custom(resolver) => Self::Custom(Arc::clone(resolver)),
        }
    }
}

impl<T> fmt::Debug for PolicySpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default(default) => f.debug_tuple("Default").field(default).finish(),
            Self::Rules(rules) => f.debug_tuple("Rules").field(rules).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").field(&"...").finish(),
        }
    }
}
