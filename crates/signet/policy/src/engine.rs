//! Substitution policy engine

use std::fmt;
use std::sync::Arc;

use signet_model::IdentityModelAdapter;
use signet_types::{DeclarationState, IdentityRecord, PackageView, QueryFlags, SignetConfig};
use tracing::{debug, error, warn};

use crate::decision::{IneligibleReason, SubstitutionDecision};
use crate::outcome::SubstitutionOutcome;

/// Runs the gates and performs the identity swap.
///
/// Holds no per-query state; one engine serves every query.
#[derive(Clone)]
pub struct SubstitutionEngine {
    config: Arc<SignetConfig>,
    adapter: Arc<dyn IdentityModelAdapter>,
}

impl SubstitutionEngine {
    pub fn new(config: Arc<SignetConfig>, adapter: Arc<dyn IdentityModelAdapter>) -> Self {
        Self { config, adapter }
    }

    pub fn config(&self) -> &SignetConfig {
        &self.config
    }

    pub fn adapter(&self) -> &Arc<dyn IdentityModelAdapter> {
        &self.adapter
    }

    /// Run the four gates in order, stopping at the first failure
    pub fn evaluate<'v>(&self, view: &PackageView<'v>) -> SubstitutionDecision<'v> {
        let result = self
            .check_shape(view)
            .and_then(|()| self.check_capability(view))
            .and_then(|()| self.check_declaration(view))
            .and_then(|declared| self.check_grant(view).map(|()| declared));

        match result {
            Ok(declared) => SubstitutionDecision::Eligible { declared },
            Err(reason) => SubstitutionDecision::Ineligible(reason),
        }
    }

    /// Evaluate `record` and, when eligible and requested, replace its signing identity.
    ///
    /// The record is changed only on [`SubstitutionOutcome::Substituted`].
    pub fn apply(&self, record: &mut IdentityRecord, flags: QueryFlags) -> SubstitutionOutcome {
        let declared = {
            let view = PackageView::new(record, flags);
            match self.evaluate(&view) {
                SubstitutionDecision::Eligible { declared } => declared.to_string(),
                SubstitutionDecision::Ineligible(reason) => {
                    return SubstitutionOutcome::Ineligible(reason)
                }
            }
        };

        if !flags.requests_signing_identity() {
            debug!(package = %record.name, "signing identity not requested");
            return SubstitutionOutcome::NotRequested;
        }

        match self.adapter.build_signing_identity(&declared) {
            Ok(identity) => {
                record.signing_identity = identity;
                debug!(
                    package = %record.name,
                    version = %self.adapter.version(),
                    "signing identity substituted"
                );
                SubstitutionOutcome::Substituted
            }
            Err(e) => {
                error!(
                    package = %record.name,
                    error = %e,
                    "Failed to substitute signing identity, keeping the original"
                );
                SubstitutionOutcome::MutationFailed(e)
            }
        }
    }

    fn check_shape(&self, view: &PackageView<'_>) -> Result<(), IneligibleReason> {
        if view.has_capability_sections() {
            Ok(())
        } else {
            Err(IneligibleReason::ShapeAbsent)
        }
    }

    fn check_capability(&self, view: &PackageView<'_>) -> Result<(), IneligibleReason> {
        if view.has_capability(&self.config.substitution.capability) {
            Ok(())
        } else {
            Err(IneligibleReason::CapabilityNotRequested)
        }
    }

    fn check_declaration<'v>(&self, view: &PackageView<'v>) -> Result<&'v str, IneligibleReason> {
        let substitution = &self.config.substitution;
        let suppressed = substitution.is_benign(view.name());
        if view.metadata().is_none() {
            if !suppressed {
                warn!(package = %view.name(), "Cannot read metadata for package (metadata absent)");
            }
            return Err(IneligibleReason::DeclarationMissing { suppressed });
        }

        let found = match view.declaration(&substitution.metadata_key) {
            DeclarationState::Valid(declared) => return Ok(declared),
            DeclarationState::Missing => "nothing".to_string(),
            DeclarationState::Null => "null".to_string(),
            DeclarationState::NotAString(kind) => kind.to_string(),
        };
        if !suppressed {
            warn!(
                package = %view.name(),
                key = %substitution.metadata_key,
                found = %found,
                "Substitution declaration is invalid (not a string, or null)"
            );
        }
        Err(IneligibleReason::DeclarationInvalid { found, suppressed })
    }

    fn check_grant(&self, view: &PackageView<'_>) -> Result<(), IneligibleReason> {
        let requested = view.requested_capabilities().map_or(0, <[String]>::len);
        let grants = view.grant_flags().map_or(0, <[i32]>::len);
        if !view.lengths_match() {
            warn!(
                package = %view.name(),
                requested,
                grants,
                "Requested capabilities and grant flags differ in length, inspect the package for errors"
            );
            return Err(IneligibleReason::LengthMismatch { requested, grants });
        }

        let substitution = &self.config.substitution;
        let mut paired = view.grants_for(&substitution.capability).peekable();
        if paired.peek().is_none() {
            return Err(IneligibleReason::CapabilityNotPaired);
        }
        if paired.all(|grant| grant & substitution.grant_bit != 0) {
            Ok(())
        } else {
            warn!(
                package = %view.name(),
                capability = %substitution.capability,
                "Substitution capability was not granted"
            );
            Err(IneligibleReason::NotGranted)
        }
    }
}

impl fmt::Debug for SubstitutionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubstitutionEngine")
            .field("config", &self.config)
            .field("adapter", &self.adapter)
            .finish()
    }
}
