//! Property tests: repeated queries answer identically.

use proptest::prelude::*;
use signet_model::ModelVersion;
use signet_tests::{reference_runtime, FixtureProducer};
use signet_types::{QueryFlags, UserHandle};

use crate::strategies::{arb_flags, arb_record};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn same_query_same_record(
        record in arb_record(),
        flags in arb_flags(),
        version in prop::sample::select(ModelVersion::ALL.to_vec()),
    ) {
        let runtime = reference_runtime(version);
        let name = record.name.clone();
        let producer = runtime.wrap_producer(FixtureProducer::new().with(record));

        let first = producer.produce_with_outcome(&name, flags, UserHandle(0));
        let second = producer.produce_with_outcome(&name, flags, UserHandle(0));
        prop_assert_eq!(&first, &second);

        // the base is always asked for the capability sections
        let queries = producer.base().queries();
        prop_assert_eq!(queries.len(), 2);
        prop_assert!(queries.iter().all(|q| q.contains(QueryFlags::GET_PERMISSIONS)));

        if let Some((returned, _)) = first {
            if !flags.requests_capabilities() {
                prop_assert!(returned.defined_capabilities.is_none());
                prop_assert!(returned.requested_capabilities.is_none());
                prop_assert!(returned.grant_flags.is_none());
            }
        }
    }

    #[test]
    fn unknown_package_yields_nothing(flags in arb_flags()) {
        let runtime = reference_runtime(ModelVersion::StandaloneSigningDetails);
        let producer = runtime.wrap_producer(FixtureProducer::new());
        prop_assert!(producer
            .produce_identity_record(&"com.missing".to_string(), flags, UserHandle(0))
            .is_none());
    }
}
