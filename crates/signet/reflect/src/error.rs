//! Error types for structural resolution and invocation

use thiserror::Error;

/// Errors raised by the resolver and by handles.
///
/// Every failure is surfaced to the immediate caller; nothing at this layer
/// degrades silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectError {
    /// The named type is not registered
    #[error("unknown type `{0}`")]
    UnknownType(String),

    /// No declared member accepts the supplied argument shape
    #[error("no member `{member}` on `{owner}` accepts ({shape})")]
    Resolution {
        owner: String,
        member: String,
        shape: String,
    },

    /// A member was selected but its body failed
    #[error("invocation of `{owner}::{member}` failed: {reason}")]
    Invocation {
        owner: String,
        member: String,
        reason: String,
    },

    /// A handle was used in a state that does not permit the operation
    #[error("invalid handle state: {0}")]
    InvalidState(String),

    /// Interfaces, abstract types and primitives have no constructors
    #[error("type `{0}` cannot be instantiated")]
    NotInstantiable(String),

    /// A value does not conform to the type the caller asked for
    #[error("{context}: expected {expected}, found {actual}")]
    TypeMismatch {
        context: String,
        expected: String,
        actual: String,
    },
}

impl ReflectError {
    pub(crate) fn resolution(
        owner: impl Into<String>,
        member: impl Into<String>,
        shape: impl Into<String>,
    ) -> Self {
        Self::Resolution {
            owner: owner.into(),
            member: member.into(),
            shape: shape.into(),
        }
    }

    pub(crate) fn invocation(
        owner: impl Into<String>,
        member: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Invocation {
            owner: owner.into(),
            member: member.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error came from a missing member rather than a failing one
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution { .. } | Self::UnknownType(_))
    }
}

/// Result type for reflective operations
pub type Result<T> = std::result::Result<T, ReflectError>;
