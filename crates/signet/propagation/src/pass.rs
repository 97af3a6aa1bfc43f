//! Batch identity-propagation pass

use std::sync::Arc;

use signet_reflect::Value;
use signet_types::{InstallationRequest, PackageDescriptor, SignetConfig};
use tracing::{debug, warn};

use crate::predicate::{LocationPredicate, SystemClassPredicate};

/// What one run of the pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// A reference request was present in the batch
    pub reference_found: bool,
    /// Names of the rewritten requests, in batch order
    pub rewritten: Vec<String>,
}

impl PropagationReport {
    pub fn rewrote(&self, name: &str) -> bool {
        self.rewritten.iter().any(|n| n == name)
    }
}

/// Propagates the reference signing identity across one installation batch.
///
/// Never fails: anything it cannot decide leaves the request unchanged.
#[derive(Debug, Clone)]
pub struct PropagationPass {
    config: Arc<SignetConfig>,
    predicate: Arc<dyn SystemClassPredicate>,
}

impl PropagationPass {
    pub fn new(config: Arc<SignetConfig>) -> Self {
        let predicate = LocationPredicate::from_config(&config.propagation);
        Self {
            config,
            predicate: Arc::new(predicate),
        }
    }

    pub fn with_predicate(mut self, predicate: Arc<dyn SystemClassPredicate>) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn config(&self) -> &SignetConfig {
        &self.config
    }

    /// Rewrite eligible requests.
    ///
    /// The output has the input's length and order. Without a reference request
    /// the input is returned as-is.
    pub fn run(
        &self,
        requests: Vec<InstallationRequest>,
    ) -> (Vec<InstallationRequest>, PropagationReport) {
        let mut report = PropagationReport::default();
        if !self.config.propagation.enabled {
            return (requests, report);
        }

        let platform = &self.config.propagation.platform_package;
        let Some(reference_index) = requests.iter().position(|r| r.name() == platform.as_str())
        else {
            debug!(platform = %platform, "no reference package in batch");
            return (requests, report);
        };
        report.reference_found = true;

        let reference = requests[reference_index].package.signing_identity.clone();
        let rewritten = requests
            .into_iter()
            .enumerate()
            .map(|(index, request)| {
                if index == reference_index || !self.is_eligible(&request.package, &reference) {
                    return request;
                }
                warn!(package = %request.name(), "Propagated platform signing identity to package");
                report.rewritten.push(request.name().to_string());
                request.with_signing_identity(reference.clone())
            })
            .collect();

        (rewritten, report)
    }

    fn is_eligible(&self, package: &PackageDescriptor, reference: &Value) -> bool {
        let capability = &self.config.propagation.capability;
        if !package.uses_capability(capability) {
            return false;
        }
        debug!(
            package = %package.name,
            capability = %capability,
            "package declares propagation capability"
        );

        if package.signed_with_platform_key || &package.signing_identity == reference {
            return false;
        }

        match self.predicate.accepts(package) {
            Ok(accepted) => accepted,
            Err(e) => {
                debug!(
                    package = %package.name,
                    error = %e,
                    "system class undetermined, not propagating"
                );
                false
            }
        }
    }
}
