//! Substitution outcomes

use signet_model::ModelError;

use crate::decision::IneligibleReason;

/// What happened to one record
#[derive(Debug, Clone, PartialEq)]
pub enum SubstitutionOutcome {
    /// The signing identity was replaced
    Substituted,
    /// Eligible, but the caller did not ask for a signing identity
    NotRequested,
    Ineligible(IneligibleReason),
    /// Building the identity failed; the original identity was kept
    MutationFailed(ModelError),
}

impl SubstitutionOutcome {
    pub fn is_substituted(&self) -> bool {
        matches!(self, Self::Substituted)
    }

    pub fn ineligible_reason(&self) -> Option<&IneligibleReason> {
        match self {
            Self::Ineligible(reason) => Some(reason),
            _ => None,
        }
    }
}
