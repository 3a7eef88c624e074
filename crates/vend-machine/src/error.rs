//! # Machine Error Types
//!
//! Failures while assembling a machine: reading and parsing `machine.toml`,
//! applying `VEND_*` overrides, validating the result, or parsing replay
//! steps. Purchase failures stay `VendError`s and never appear here.

use thiserror::Error;
use vend_core::ValidationError;

/// Result type alias for machine setup.
pub type MachineResult<T> = Result<T, MachineError>;

#[derive(Debug, Error)]
pub enum MachineError {
    /// Configuration is well-formed but makes no sense.
    #[error("Invalid machine configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    ConfigParseFailed(#[from] toml::de::Error),

    /// A denomination, coin load or product failed domain validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A command-line flag was given without its value.
    #[error("Missing value for {flag}")]
    MissingArgument { flag: String },

    /// A replay step could not be understood.
    #[error("Invalid step '{step}': {reason}")]
    InvalidStep { step: String, reason: String },
}
