//! Reconcile interception

use signet_types::InstallationRequest;
use tracing::debug;

use crate::error::ReconcileFailure;
use crate::pass::{PropagationPass, PropagationReport};

/// The host's batch reconciliation step
pub trait Reconciler {
    /// Host state consulted by reconciliation (package maps, shared libraries,
    /// key sets, settings). Forwarded untouched.
    type Context;
    type Output;

    fn reconcile(
        &self,
        requests: Vec<InstallationRequest>,
        context: &Self::Context,
    ) -> Result<Vec<Self::Output>, ReconcileFailure>;
}

/// Runs the propagation pass, then hands the batch to the downstream reconciler
#[derive(Debug, Clone)]
pub struct PropagatingReconciler<R> {
    inner: R,
    pass: PropagationPass,
}

impl<R: Reconciler> PropagatingReconciler<R> {
    pub fn new(inner: R, pass: PropagationPass) -> Self {
        Self { inner, pass }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn pass(&self) -> &PropagationPass {
        &self.pass
    }

    /// Reconcile and also return what the pass rewrote
    pub fn reconcile_with_report(
        &self,
        requests: Vec<InstallationRequest>,
        context: &R::Context,
    ) -> (Result<Vec<R::Output>, ReconcileFailure>, PropagationReport) {
        let (requests, report) = self.pass.run(requests);
        debug!(
            reference_found = report.reference_found,
            rewritten = report.rewritten.len(),
            batch = requests.len(),
            "propagation pass complete"
        );
        (self.inner.reconcile(requests, context), report)
    }
}

impl<R: Reconciler> Reconciler for PropagatingReconciler<R> {
    type Context = R::Context;
    type Output = R::Output;

    fn reconcile(
        &self,
        requests: Vec<InstallationRequest>,
        context: &Self::Context,
    ) -> Result<Vec<Self::Output>, ReconcileFailure> {
        self.reconcile_with_report(requests, context).0
    }
}
