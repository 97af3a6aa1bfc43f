//! # signet-policy
//!
//! Decides, per identity query, whether the reported signing identity of an
//! application is replaced by the identity it declares in its metadata.
//!
//! Four gates run in order and stop at the first failure:
//!
//! 1. **Shape** - the requested-capability and grant sections are present
//! 2. **Capability** - the substitution capability is requested
//! 3. **Declaration** - the metadata holds a string under the configured key
//! 4. **Grant** - every paired grant entry for the capability carries the grant bit
//!
//! Only when all four pass, and the caller asked for a signing identity, is the
//! identity rebuilt through the model adapter and swapped in as one assignment.

#![deny(unsafe_code)]

pub mod decision;
pub mod engine;
pub mod outcome;
pub mod producer;

pub use decision::{Gate, IneligibleReason, SubstitutionDecision};
pub use engine::SubstitutionEngine;
pub use outcome::SubstitutionOutcome;
pub use producer::{BaseIdentityProducer, SubstitutingProducer};
