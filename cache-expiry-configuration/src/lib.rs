#![warn(missing_docs)]
//! Configuration support for cache-expiry policies.
//!
//! Reads the `cache_control` section of an endpoint configuration from YAML
//! or JSON and compiles it into a [`Resolver`](cache_expiry::Resolver).
//!
//! ```
//! use cache_expiry_configuration::ConfigEndpoint;
//!
//! let yaml = r#"
//! cache_control:
//!   404: "max-age=10"
//!   5xx: "no-cache"
//!   xxx: "max-age=3600"
//! "#;
//!
//! let endpoint = ConfigEndpoint::from_yaml(yaml)?.into_endpoint()?;
//! assert_eq!(endpoint.cache_control.resolve(502), "no-cache");
//! # Ok::<(), cache_expiry_configuration::ConfigError>(())
//! ```

pub mod cache_control;
pub mod error;

use cache_expiry::Resolver;
use serde::{Deserialize, Serialize};

pub use cache_control::{CacheControl, PatternKey};
pub use error::ConfigError;

/// Endpoint configuration as read from a document.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ConfigEndpoint {
    /// Cache control policy, in shorthand or per-status form.
    pub cache_control: CacheControl,
}

impl ConfigEndpoint {
    /// Parse an endpoint configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_saphyr::from_str(yaml)?)
    }

    /// Parse an endpoint configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the configuration and build a ready to use [`Endpoint`].
    pub fn into_endpoint(self) -> Result<Endpoint, ConfigError> {
        let cache_control = self
            .cache_control
            .into_resolver::<String>()
            .inspect_err(|error| {
                tracing::error!(%error, "invalid cache control configuration");
            })?;
        Ok(Endpoint { cache_control })
    }
}

/// Compiled endpoint configuration.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Expiration value for each response status code.
    pub cache_control: Resolver,
}
