//! Error types for the model adapters

use signet_reflect::ReflectError;
use thiserror::Error;

/// Model adapter errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Resolution or invocation failed in the host model
    #[error(transparent)]
    Reflect(#[from] ReflectError),

    /// No known model version is fully registered
    #[error("No supported identity model, missing types: {missing:?}")]
    UnsupportedModel { missing: Vec<String> },

    /// The key projection produced no keys
    #[error("Key projection `{owner}::{method}` returned null")]
    MissingKeys { owner: String, method: String },

    /// A signing identity did not have the expected shape
    #[error("Malformed signing identity: {reason}")]
    Malformed { reason: String },
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
