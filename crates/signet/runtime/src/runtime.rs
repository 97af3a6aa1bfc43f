//! Runtime assembly

use std::sync::Arc;

use signet_model::platform::reference_registry;
use signet_model::{IdentityModelAdapter, ModelVersion, ResolvingAdapter};
use signet_policy::{BaseIdentityProducer, SubstitutingProducer, SubstitutionEngine};
use signet_propagation::{PropagatingReconciler, PropagationPass, Reconciler};
use signet_reflect::TypeRegistry;
use signet_types::SignetConfig;
use tracing::info;

use crate::error::Result;

/// Shared configuration and model adapter, built once at startup
#[derive(Debug, Clone)]
pub struct SignetRuntime {
    config: Arc<SignetConfig>,
    adapter: Arc<dyn IdentityModelAdapter>,
}

impl SignetRuntime {
    /// Validate `config` and probe the host registry for its model version
    pub fn bootstrap(config: SignetConfig, registry: Arc<TypeRegistry>) -> Result<Self> {
        config.validate()?;
        let types = registry.len();
        let adapter = ResolvingAdapter::probe(registry)?;
        info!(version = %adapter.version(), types, "identity model probed");
        Ok(Self::with_adapter(config, Arc::new(adapter)))
    }

    /// Bootstrap over the reference schemas of `version`
    pub fn with_reference_platform(config: SignetConfig, version: ModelVersion) -> Result<Self> {
        Self::bootstrap(config, Arc::new(reference_registry(version)))
    }

    /// Parse a JSON configuration, then bootstrap
    pub fn from_json_str(input: &str, registry: Arc<TypeRegistry>) -> Result<Self> {
        Self::bootstrap(SignetConfig::from_json_str(input)?, registry)
    }

    /// Assemble around an already selected adapter; the config is not revalidated
    pub fn with_adapter(config: SignetConfig, adapter: Arc<dyn IdentityModelAdapter>) -> Self {
        Self {
            config: Arc::new(config),
            adapter,
        }
    }

    pub fn config(&self) -> &Arc<SignetConfig> {
        &self.config
    }

    pub fn adapter(&self) -> &Arc<dyn IdentityModelAdapter> {
        &self.adapter
    }

    pub fn version(&self) -> ModelVersion {
        self.adapter.version()
    }

    pub fn substitution_engine(&self) -> SubstitutionEngine {
        SubstitutionEngine::new(self.config.clone(), self.adapter.clone())
    }

    /// Wrap the host's identity producer
    pub fn wrap_producer<P: BaseIdentityProducer>(&self, base: P) -> SubstitutingProducer<P> {
        SubstitutingProducer::new(base, self.substitution_engine())
    }

    pub fn propagation_pass(&self) -> PropagationPass {
        PropagationPass::new(self.config.clone())
    }

    /// Wrap the host's batch reconciler
    pub fn wrap_reconciler<R: Reconciler>(&self, inner: R) -> PropagatingReconciler<R> {
        PropagatingReconciler::new(inner, self.propagation_pass())
    }
}
