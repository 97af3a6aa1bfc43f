//! # signet-propagation
//!
//! Runs once per installation batch, before the host reconciles it. The request
//! for the platform package is the reference; every other request that declares
//! the propagation capability, is not yet signed like the reference, and passes
//! the [`SystemClassPredicate`] is rebuilt carrying the reference's signing
//! identity. The downstream [`Reconciler`] then sees the rewritten batch.

#![deny(unsafe_code)]

pub mod error;
pub mod pass;
pub mod predicate;
pub mod reconcile;

pub use error::{PredicateError, ReconcileFailure};
pub use pass::{PropagationPass, PropagationReport};
pub use predicate::{LocationPredicate, SystemClassPredicate};
pub use reconcile::{PropagatingReconciler, Reconciler};
