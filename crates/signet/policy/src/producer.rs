//! Identity query entry point

use signet_types::{IdentityRecord, QueryFlags, UserHandle};

use crate::engine::SubstitutionEngine;
use crate::outcome::SubstitutionOutcome;

/// The host's identity-reporting pipeline
pub trait BaseIdentityProducer {
    /// Host-side description of the queried application
    type Descriptor;

    /// Build the identity record for `descriptor`, or `None` when the host has
    /// nothing to report
    fn produce(
        &self,
        descriptor: &Self::Descriptor,
        flags: QueryFlags,
        user: UserHandle,
    ) -> Option<IdentityRecord>;
}

/// Wraps a base producer and applies substitution to every record it produces.
///
/// The base producer is always asked for the capability sections, since the
/// gates need them. Sections the caller did not ask for are cleared again before
/// the record is returned.
#[derive(Debug, Clone)]
pub struct SubstitutingProducer<P> {
    base: P,
    engine: SubstitutionEngine,
}

impl<P: BaseIdentityProducer> SubstitutingProducer<P> {
    pub fn new(base: P, engine: SubstitutionEngine) -> Self {
        Self { base, engine }
    }

    pub fn base(&self) -> &P {
        &self.base
    }

    pub fn engine(&self) -> &SubstitutionEngine {
        &self.engine
    }

    /// Produce a record with substitution applied
    pub fn produce_identity_record(
        &self,
        descriptor: &P::Descriptor,
        flags: QueryFlags,
        user: UserHandle,
    ) -> Option<IdentityRecord> {
        self.produce_with_outcome(descriptor, flags, user)
            .map(|(record, _)| record)
    }

    /// Like [`produce_identity_record`](Self::produce_identity_record), also
    /// reporting what substitution did
    pub fn produce_with_outcome(
        &self,
        descriptor: &P::Descriptor,
        flags: QueryFlags,
        user: UserHandle,
    ) -> Option<(IdentityRecord, SubstitutionOutcome)> {
        let mut record =
            self.base
                .produce(descriptor, flags | QueryFlags::GET_PERMISSIONS, user)?;
        let outcome = self.engine.apply(&mut record, flags);
        restore_requested_sections(&mut record, flags);
        Some((record, outcome))
    }
}

impl<P: BaseIdentityProducer> BaseIdentityProducer for SubstitutingProducer<P> {
    type Descriptor = P::Descriptor;

    fn produce(
        &self,
        descriptor: &Self::Descriptor,
        flags: QueryFlags,
        user: UserHandle,
    ) -> Option<IdentityRecord> {
        self.produce_identity_record(descriptor, flags, user)
    }
}

/// Clear the capability sections unless the caller requested them
pub fn restore_requested_sections(record: &mut IdentityRecord, flags: QueryFlags) {
    if !flags.requests_capabilities() {
        record.clear_capability_sections();
    }
}
