//! Error types for propagation and reconciliation

use thiserror::Error;

/// Failure reported by the downstream reconciler, passed through untouched
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconcileFailure {
    /// One package could not be reconciled
    #[error("Reconciliation failed for package {package}: {reason}")]
    Package { package: String, reason: String },

    /// The batch as a whole could not be reconciled
    #[error("Reconciliation failed: {reason}")]
    Batch { reason: String },
}

/// A system-class predicate could not classify a package
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Cannot classify package {package}: {reason}")]
pub struct PredicateError {
    pub package: String,
    pub reason: String,
}
