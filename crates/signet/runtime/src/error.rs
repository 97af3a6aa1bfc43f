//! Error types for runtime wiring

use signet_model::ModelError;
use signet_types::ConfigError;
use thiserror::Error;

/// Runtime errors
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Identity model could not be probed
    #[error("Identity model error: {0}")]
    Model(#[from] ModelError),

    /// Tracing subscriber could not be installed
    #[error("Telemetry initialization failed: {0}")]
    Telemetry(String),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
