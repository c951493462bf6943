//! Error types for policy compilation.

use thiserror::Error;

/// Error returned by [`compile`](crate::compile) when a policy specification
/// is malformed.
///
/// All variants are raised eagerly while compiling. A successfully compiled
/// [`Resolver`](crate::Resolver) never fails, so configuration problems show
/// up once at startup instead of on the request path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The specification is neither a string, a mapping, nor a function.
    ///
    /// Carries the name of the type that was found (`"number"`, `"array"`, ...).
    #[error("cache control option cannot be type {0}")]
    InvalidSpecType(&'static str),

    /// A mapping key is not one of `xxx`, `[1-5]xx` or `[1-5][0-9][0-9]`.
    #[error("invalid status pattern {0:?}")]
    InvalidStatusPattern(String),

    /// The value under the given key is not a string.
    #[error("invalid cache control for status pattern {0:?}")]
    InvalidExpirationValue(String),

    /// The mapping has no universal `xxx` entry to fall back to.
    #[error("no default expiration provided (missing \"xxx\" entry)")]
    MissingDefault,
}
