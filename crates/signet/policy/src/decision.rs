//! Gate decisions

use std::fmt;

/// The four substitution gates, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Gate {
    Shape,
    Capability,
    Declaration,
    Grant,
}

/// Why a record is not eligible for substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IneligibleReason {
    /// Requested-capability or grant section absent
    ShapeAbsent,
    /// Substitution capability not requested
    CapabilityNotRequested,
    /// No metadata at all
    DeclarationMissing {
        /// Package is on the benign allow-list; nothing was logged
        suppressed: bool,
    },
    /// Metadata present but no usable string under the key
    DeclarationInvalid {
        found: String,
        /// Package is on the benign allow-list; nothing was logged
        suppressed: bool,
    },
    /// Requested and grant sections differ in length
    LengthMismatch { requested: usize, grants: usize },
    /// A paired grant entry lacks the grant bit
    NotGranted,
    /// Capability absent from the paired scan
    CapabilityNotPaired,
}

impl IneligibleReason {
    /// Gate that produced this reason
    pub fn gate(&self) -> Gate {
        match self {
            Self::ShapeAbsent => Gate::Shape,
            Self::CapabilityNotRequested => Gate::Capability,
            Self::DeclarationMissing { .. } | Self::DeclarationInvalid { .. } => Gate::Declaration,
            Self::LengthMismatch { .. } | Self::NotGranted | Self::CapabilityNotPaired => {
                Gate::Grant
            }
        }
    }

    /// Whether the gate logged a warning for this reason
    pub fn is_reported(&self) -> bool {
        match self {
            Self::DeclarationMissing { suppressed }
            | Self::DeclarationInvalid { suppressed, .. } => !suppressed,
            Self::LengthMismatch { .. } | Self::NotGranted => true,
            Self::ShapeAbsent | Self::CapabilityNotRequested | Self::CapabilityNotPaired => false,
        }
    }
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeAbsent => write!(f, "capability sections absent"),
            Self::CapabilityNotRequested => write!(f, "substitution capability not requested"),
            Self::DeclarationMissing { .. } => write!(f, "metadata absent"),
            Self::DeclarationInvalid { found, .. } => {
                write!(f, "declaration invalid (found {})", found)
            }
            Self::LengthMismatch { requested, grants } => write!(
                f,
                "{} requested capabilities but {} grant entries",
                requested, grants
            ),
            Self::NotGranted => write!(f, "substitution capability not granted"),
            Self::CapabilityNotPaired => write!(f, "substitution capability has no grant entry"),
        }
    }
}

/// Result of running the gates over one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionDecision<'v> {
    /// All gates passed; carries the declared identity text
    Eligible { declared: &'v str },
    Ineligible(IneligibleReason),
}

impl SubstitutionDecision<'_> {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible { .. })
    }
}
