//! Property tests: a record is either fully substituted or left untouched.

use std::sync::Arc;

use proptest::prelude::*;
use signet_model::{IdentityModelAdapter, ModelError, ModelVersion};
use signet_policy::{SubstitutionEngine, SubstitutionOutcome};
use signet_tests::reference_runtime;
use signet_types::{QueryFlags, SignetConfig, SigningIdentity};

use crate::strategies::{arb_eligible_record, arb_flags, arb_record};

/// Adapter whose model construction always fails
#[derive(Debug)]
struct BrokenModel;

impl IdentityModelAdapter for BrokenModel {
    fn version(&self) -> ModelVersion {
        ModelVersion::NestedSigningDetails
    }

    fn build_signing_identity(&self, _declared: &str) -> signet_model::Result<SigningIdentity> {
        Err(ModelError::Malformed {
            reason: "details constructor rejected its arguments".into(),
        })
    }

    fn signatures_of(&self, _identity: &SigningIdentity) -> signet_model::Result<Vec<String>> {
        Ok(Vec::new())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Only a substituted record differs from its input, and then only in its identity.
    #[test]
    fn record_changes_only_on_substitution(
        record in arb_record(),
        flags in arb_flags(),
        version in prop::sample::select(ModelVersion::ALL.to_vec()),
    ) {
        let runtime = reference_runtime(version);
        let engine = runtime.substitution_engine();
        let mut mutated = record.clone();
        let outcome = engine.apply(&mut mutated, flags);

        if outcome.is_substituted() {
            prop_assert_ne!(&mutated.signing_identity, &record.signing_identity);
            let mut rest = mutated.clone();
            rest.signing_identity = record.signing_identity.clone();
            prop_assert_eq!(rest, record);
        } else {
            prop_assert_eq!(mutated, record);
        }
    }

    /// A substituted identity carries exactly the declared signature.
    #[test]
    fn substituted_identity_matches_declaration(
        record in arb_eligible_record(),
        version in prop::sample::select(ModelVersion::ALL.to_vec()),
    ) {
        let runtime = reference_runtime(version);
        let engine = runtime.substitution_engine();
        let declared = record
            .declared_metadata
            .as_ref()
            .and_then(|m| m.get(signet_types::SUBSTITUTION_METADATA_KEY))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_default();

        let mut mutated = record.clone();
        let outcome = engine.apply(&mut mutated, QueryFlags::GET_SIGNATURES);

        if declared.is_empty() {
            // an empty signature has no signing keys
            prop_assert!(
                version == ModelVersion::LegacySignatures
                    || matches!(outcome, SubstitutionOutcome::MutationFailed(_)),
                "{:?}",
                outcome
            );
        } else {
            prop_assert_eq!(&outcome, &SubstitutionOutcome::Substituted);
        }
        if outcome.is_substituted() {
            let signatures = runtime.adapter().signatures_of(&mutated.signing_identity).unwrap();
            prop_assert_eq!(signatures, vec![declared.to_lowercase()]);
        }
    }

    /// A failing model leaves every eligible record exactly as it was.
    #[test]
    fn failed_construction_keeps_record(record in arb_eligible_record()) {
        let engine =
            SubstitutionEngine::new(Arc::new(SignetConfig::default()), Arc::new(BrokenModel));
        let mut mutated = record.clone();
        let outcome = engine.apply(&mut mutated, QueryFlags::GET_SIGNING_CERTIFICATES);
        prop_assert!(matches!(outcome, SubstitutionOutcome::MutationFailed(_)), "{:?}", outcome);
        prop_assert_eq!(mutated, record);
    }
}
