//! Validated, immutable expiration tables.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::PolicyError;
use crate::pattern::StatusPattern;
use crate::spec::json_type_name;

/// A validated mapping from [`StatusPattern`] to expiration value.
///
/// The default (`xxx`) value is stored outside the pattern table, so a
/// compiled policy cannot exist without one. Nothing can be inserted or
/// removed after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPolicy<T = String> {
    rules: BTreeMap<StatusPattern, T>,
    default: T,
}

impl<T> CompiledPolicy<T>
where
    T: From<String>,
{
    /// Validates and normalizes a mapping of pattern keys to values.
    ///
    /// Keys are checked before their values. When two keys normalize to the
    /// same pattern (`"4XX"` and `"4xx"`), the one inserted last wins.
    pub fn from_rules(rules: IndexMap<String, Value>) -> Result<Self, PolicyError> {
        let mut table = BTreeMap::new();
        let mut default = None;

        for (key, value) in rules {
            let pattern: StatusPattern = key.parse()?;
            let expiration = match value {
                Value::String(expiration) => expiration,
                other => {
                    tracing::debug!(
                        key = %key,
                        found = json_type_name(&other),
                        "expiration value is not a string"
                    );
                    return Err(PolicyError::InvalidExpirationValue(key));
                }
            };

            let replaced = match pattern {
                StatusPattern::Default => default.replace(T::from(expiration)).is_some(),
                _ => table.insert(pattern, T::from(expiration)).is_some(),
            };
            if replaced {
                tracing::warn!(
                    key = %key,
                    pattern = %pattern,
                    "duplicate status pattern, keeping the later value"
                );
            }
        }

        let default = default.ok_or(PolicyError::MissingDefault)?;
        tracing::debug!(rules = table.len(), "compiled cache control policy");
        Ok(Self {
            rules: table,
            default,
        })
    }

    /// A policy returning `default` for every status code.
    pub fn uniform(default: impl Into<String>) -> Self {
        Self {
            rules: BTreeMap::new(),
            default: T::from(default.into()),
        }
    }
}

impl<T> CompiledPolicy<T> {
    /// Looks up the value for a status code.
    ///
    /// Tries the exact code first, then its class, then falls back to the
    /// default. Always returns a value.
    pub fn lookup(&self, code: u16) -> &T {
        if let Some(value) = self.rules.get(&StatusPattern::Exact(code)) {
            tracing::trace!(code, "exact status rule matched");
            return value;
        }
        if let Some(value) = StatusPattern::class_of(code).and_then(|class| self.rules.get(&class))
        {
            tracing::trace!(code, "status class rule matched");
            return value;
        }
        tracing::trace!(code, "falling back to default expiration");
        &self.default
    }

    /// The value stored under `xxx`.
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// The value stored under exactly this pattern, without fallback.
    pub fn get(&self, pattern: StatusPattern) -> Option<&T> {
        match pattern {
            StatusPattern::Default => Some(&self.default),
            _ => self.rules.get(&pattern),
        }
    }

    /// Number of configured patterns, the default included.
    pub fn len(&self) -> usize {
        self.rules.len() + 1
    }

    /// Always `false`: a compiled policy holds at least its default.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over every pattern and its value, most specific first.
    pub fn iter(&self) -> impl Iterator<Item = (StatusPattern, &T)> {
        self.rules
            .iter()
            .map(|(pattern, value)| (*pattern, value))
            .chain(std::iter::once((StatusPattern::Default, &self.default)))
    }
}
