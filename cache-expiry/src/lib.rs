#![warn(missing_docs)]
//! # cache-expiry
//!
//! Status-code keyed cache-control expiration policies.
//!
//! A policy says how long a response may be cached depending on its HTTP
//! status code. It is written once, in configuration or code, and compiled
//! into a [`Resolver`] that HTTP middleware queries for every response.
//!
//! ## Specifications
//!
//! A [`PolicySpec`] is one of:
//!
//! - a **string**: the same expiration for every status code;
//! - a **mapping** from [`StatusPattern`] keys (`404`, `4xx`, `xxx`) to
//!   expiration strings, which must include the `xxx` default;
//! - a **custom function** from status code to any value, used verbatim
//!   (see [`compile_custom`] for value types other than strings).
//!
//! ## Resolution
//!
//! For a mapping, the most specific pattern wins:
//!
//! 1. the exact status code (`404`),
//! 2. its class (`4xx`),
//! 3. the default (`xxx`).
//!
//! All validation happens in [`compile`]; resolving never fails.
//!
//! ```
//! use cache_expiry::{Resolver, compile_value};
//! use serde_json::json;
//!
//! let resolver: Resolver = compile_value(json!({
//!     "404": "max-age=10",
//!     "5XX": "no-cache",
//!     "xxx": "max-age=3600",
//! }))?;
//!
//! assert_eq!(resolver.resolve(503), "no-cache");
//! assert_eq!(resolver.resolve_str("404").as_deref(), Some("max-age=10"));
//! # Ok::<(), cache_expiry::PolicyError>(())
//! ```

pub mod compiled;
pub mod error;
pub mod pattern;
pub mod resolver;
pub mod spec;

pub use compiled::CompiledPolicy;
pub use error::PolicyError;
pub use pattern::StatusPattern;
pub use resolver::{Resolver, StatusCodeSource, compile, compile_custom, compile_value};
pub use spec::{CustomResolver, PolicySpec};
