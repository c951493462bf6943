//! Cache control policy configuration.
//!
//! Supports both the shorthand and the per-status form:
//! ```yaml
//! # Shorthand: one value for every response
//! cache_control: "max-age=60"
//!
//! # Per status code, with a mandatory default
//! cache_control:
//!   404: "max-age=10"
//!   5xx: "no-cache"
//!   xxx: "max-age=3600"
//! ```

use std::fmt;

use cache_expiry::{PolicySpec, Resolver, compile};
use indexmap::IndexMap;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// A status pattern key as written in configuration.
///
/// YAML reads an unquoted `404:` as an integer, so scalar keys of any type
/// are accepted and turned back into their text (`true`, `4.04`, `null`).
/// Whether the key is a valid pattern is decided when the policy is
/// compiled, which reports anything else as an invalid status pattern.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PatternKey(pub String);

impl<'de> Deserialize<'de> for PatternKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PatternKeyVisitor;

        impl Visitor<'_> for PatternKeyVisitor {
            type Value = PatternKey;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a status pattern such as 404, 4xx or xxx")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PatternKey(value.to_owned()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PatternKey(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PatternKey(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PatternKey(value.to_string()))
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PatternKey(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PatternKey(value.to_string()))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PatternKey("null".to_owned()))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                self.visit_unit()
            }
        }

        deserializer.deserialize_any(PatternKeyVisitor)
    }
}

impl From<&str> for PatternKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

/// Cache control section of an endpoint configuration.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(untagged)]
pub enum CacheControl {
    /// Shorthand for `{ xxx: value }`: `cache_control: "no-cache"`
    Default(String),
    /// Status pattern to expiration value, in document order.
    Rules(IndexMap<PatternKey, Value>),
    /// Anything else. Kept so compilation can report the offending type.
    Other(Value),
}

impl CacheControl {
    /// Convert into an unvalidated policy specification.
    pub fn into_spec<T>(self) -> Result<PolicySpec<T>, ConfigError> {
        match self {
            CacheControl::Default(default) => Ok(PolicySpec::Default(default)),
            CacheControl::Rules(rules) => Ok(PolicySpec::Rules(
                rules.into_iter().map(|(key, value)| (key.0, value)).collect(),
            )),
            CacheControl::Other(value) => Ok(PolicySpec::from_value(value)?),
        }
    }

    /// Validate and compile into a [`Resolver`].
    pub fn into_resolver<T>(self) -> Result<Resolver<T>, ConfigError>
    where
        T: From<String>,
    {
        Ok(compile(self.into_spec::<T>()?)?)
    }
}

impl From<&str> for CacheControl {
    fn from(default: &str) -> Self {
        CacheControl::Default(default.to_owned())
    }
}
