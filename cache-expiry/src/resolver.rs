//! Compiling specifications into resolvers.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::compiled::CompiledPolicy;
use crate::error::PolicyError;
use crate::spec::{CustomResolver, PolicySpec};

/// Anything a status code can be read from.
///
/// Implemented for plain integers, [`http::StatusCode`] and for responses
/// themselves, so middleware can hand over whatever it is holding.
pub trait StatusCodeSource {
    /// The numeric HTTP status code.
    fn status_code(&self) -> u16;
}

impl StatusCodeSource for u16 {
    fn status_code(&self) -> u16 {
        *self
    }
}

impl StatusCodeSource for http::StatusCode {
    fn status_code(&self) -> u16 {
        self.as_u16()
    }
}

impl<B> StatusCodeSource for http::Response<B> {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }
}

impl StatusCodeSource for http::response::Parts {
    fn status_code(&self) -> u16 {
        self.status.as_u16()
    }
}

impl<S> StatusCodeSource for &S
where
    S: StatusCodeSource + ?Sized,
{
    fn status_code(&self) -> u16 {
        (**self).status_code()
    }
}

/// A compiled policy: maps a response status code to its expiration value.
///
/// Cloning is cheap, and a resolver can be shared between threads freely;
/// it holds no mutable state.
///
/// # Examples
///
/// ```
/// use cache_expiry::{PolicySpec, Resolver, compile};
///
/// let resolver: Resolver = compile(PolicySpec::rules([
///     ("404", "max-age=10"),
///     ("4xx", "no-cache"),
///     ("xxx", "max-age=3600"),
/// ]))?;
///
/// assert_eq!(resolver.resolve(404), "max-age=10");
/// assert_eq!(resolver.resolve_status(http::StatusCode::FORBIDDEN), "no-cache");
/// assert_eq!(resolver.resolve(200), "max-age=3600");
/// # Ok::<(), cache_expiry::PolicyError>(())
/// ```
pub enum Resolver<T = String> {
    /// Lookup in a validated table.
    Table(Arc<CompiledPolicy<T>>),
    /// A user function, exactly as it was supplied.
    Custom(CustomResolver<T>),
}

impl<T> Resolver<T>
where
    T: Clone,
{
    /// Resolves the expiration value for a status code.
    ///
    /// Table lookups prefer an exact code, then the status class, then the
    /// `xxx` default. Never fails.
    pub fn resolve(&self, code: u16) -> T {
        match self {
            Self::Table(policy) => policy.lookup(code).clone(),
            Self::Custom(resolver) => resolver(code),
        }
    }

    /// Resolves the expiration value for a response, or anything else
    /// carrying a status code.
    pub fn resolve_status(&self, status: impl StatusCodeSource) -> T {
        self.resolve(status.status_code())
    }

    /// Resolves a status code given as a numeric string such as `"404"`.
    ///
    /// Returns `None` when the string is not a number.
    pub fn resolve_str(&self, status: &str) -> Option<T> {
        status
            .trim()
            .parse::<u16>()
            .ok()
            .map(|code| self.resolve(code))
    }
}

impl<T> Resolver<T> {
    /// The compiled table, unless this is a custom resolver.
    pub fn as_table(&self) -> Option<&CompiledPolicy<T>> {
        match self {
            Self::Table(policy) => Some(policy),
            Self::Custom(_) => None,
        }
    }

    /// The user function, if this resolver was compiled from one.
    pub fn as_custom(&self) -> Option<&CustomResolver<T>> {
        match self {
            Self::Table(_) => None,
            Self::Custom(resolver) => Some(resolver),
        }
    }
}

impl<T> Clone for Resolver<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Table(policy) => Self::Table(Arc::clone(policy)),
            Self::Custom(resolver) => Self::Custom(Arc::clone(resolver)),
        }
    }
}

impl<T> fmt::Debug for Resolver<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(policy) => f.debug_tuple("Table").field(policy).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").field(&"...").finish(),
        }
    }
}

impl<T> From<CustomResolver<T>> for Resolver<T> {
    fn from(resolver: CustomResolver<T>) -> Self {
        Self::Custom(resolver)
    }
}

/// Validates a specification and turns it into a [`Resolver`].
///
/// - a string becomes a policy that returns it for every status code;
/// - a mapping is validated key by key and must contain `xxx`;
/// - a custom function is returned as is, without any checks.
///
/// Table values are built from the configured strings, hence
/// `T: From<String>`. Custom functions returning other types go through
/// [`compile_custom`] instead.
///
/// # Errors
///
/// Returns [`PolicyError::InvalidStatusPattern`],
/// [`PolicyError::InvalidExpirationValue`] or [`PolicyError::MissingDefault`]
/// for malformed mappings. No partially built resolver is ever returned.
pub fn compile<T>(spec: impl Into<PolicySpec<T>>) -> Result<Resolver<T>, PolicyError>
where
    T: From<String>,
{
    match spec.into() {
        PolicySpec::Custom(resolver) => Ok(Resolver::Custom(resolver)),
        PolicySpec::Default(default) => {
            tracing::debug!("compiled uniform cache control policy");
            Ok(Resolver::Table(Arc::new(CompiledPolicy::uniform(default))))
        }
        PolicySpec::Rules(rules) => Ok(Resolver::Table(Arc::new(CompiledPolicy::from_rules(
            rules,
        )?))),
    }
}

/// Compiles a dynamically typed specification, e.g. one read from JSON.
///
/// # Errors
///
/// Fails with [`PolicyError::InvalidSpecType`] for values that are neither a
/// string nor an object, and otherwise as [`compile`] does.
pub fn compile_value<T>(spec: Value) -> Result<Resolver<T>, PolicyError>
where
    T: From<String>,
{
    compile(PolicySpec::from_value(spec)?)
}

/// Wraps a custom function as a [`Resolver`] returning whatever it returns.
///
/// Nothing is validated, and `T` is unconstrained, so `u32`, `Duration` or
/// `Option<_>` values work as well as strings.
///
/// ```
/// use std::time::Duration;
///
/// use cache_expiry::{Resolver, compile_custom};
///
/// let resolver: Resolver<Option<Duration>> =
///     compile_custom(|status| (status < 400).then(|| Duration::from_secs(60)));
/// assert_eq!(resolver.resolve(200), Some(Duration::from_secs(60)));
/// assert_eq!(resolver.resolve(500), None);
/// ```
pub fn compile_custom<T, F>(resolver: F) -> Resolver<T>
where
    F: Fn(u16) -> T + Send + Sync + 'static,
{
    Resolver::Custom(Arc::new(resolver))
}
