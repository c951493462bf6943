//! Error types for configuration loading.

use cache_expiry::PolicyError;
use thiserror::Error;

/// Errors raised while loading cache control configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be parsed.
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_saphyr::Error),

    /// The JSON document could not be parsed.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed, but the policy it describes is invalid.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}
