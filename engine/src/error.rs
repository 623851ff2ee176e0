//! Error types for converter construction and the typed pass.
//!
//! Coercion failures and unparseable timestamps are not errors (they become
//! null). What remains are I/O and YAML problems while loading specs, specs
//! that fail validation, and duration fields that cannot be decomposed.

use command_output_core::ValidationError;
use thiserror::Error;

use crate::duration::DurationError;

/// Errors that can occur while building or running a converter.
#[derive(Debug, Error)]
pub enum EngineError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The converter spec failed validation.
    #[error("invalid converter spec: {0}")]
    InvalidSpec(#[from] ValidationError),

    /// A `custom` layout was used without supplying a front end.
    #[error("layout requires a custom front end: {0}")]
    CustomLayout(String),

    /// A duration field could not be decomposed.
    #[error("cannot derive duration from field '{field}': {source}")]
    Duration {
        field: String,
        #[source]
        source: DurationError,
    },

    /// No converter is registered under the requested name.
    #[error("unknown converter: {0}")]
    UnknownConverter(String),
}

/// Convenience alias for results with [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;
