//! Identity model adapters
//!
//! An [`IdentityModelAdapter`] builds and inspects signing identities for one
//! model version. [`ResolvingAdapter`] is the table-driven implementation over
//! the structural resolver.

use std::fmt;
use std::sync::Arc;

use signet_reflect::{Handle, Resolver, Target, TypeRef, TypeRegistry, Value};
use signet_types::SigningIdentity;
use tracing::trace;

use crate::error::{ModelError, Result};
use crate::version::{DetailsShape, ModelVersion, SchemaTable};

/// Builds signing identities for one version of the host data model
pub trait IdentityModelAdapter: Send + Sync + fmt::Debug {
    fn version(&self) -> ModelVersion;

    /// Build a complete signing identity from a declared signature text.
    ///
    /// Either every part is built or an error is returned; partial identities
    /// are never handed out.
    fn build_signing_identity(&self, declared: &str) -> Result<SigningIdentity>;

    /// Textual form of each primary signature in `identity`
    fn signatures_of(&self, identity: &SigningIdentity) -> Result<Vec<String>>;
}

/// Adapter resolving every member through a [`TypeRegistry`]
#[derive(Debug, Clone)]
pub struct ResolvingAdapter {
    registry: Arc<TypeRegistry>,
    version: ModelVersion,
    schema: SchemaTable,
}

impl ResolvingAdapter {
    pub fn new(registry: Arc<TypeRegistry>, version: ModelVersion) -> Self {
        Self {
            registry,
            version,
            schema: version.schema(),
        }
    }

    /// Probe the registry and build an adapter for the newest available version
    pub fn probe(registry: Arc<TypeRegistry>) -> Result<Self> {
        let version = ModelVersion::probe(&registry)?;
        Ok(Self::new(registry, version))
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn schema(&self) -> &SchemaTable {
        &self.schema
    }
}

impl IdentityModelAdapter for ResolvingAdapter {
    fn version(&self) -> ModelVersion {
        self.version
    }

    fn build_signing_identity(&self, declared: &str) -> Result<SigningIdentity> {
        let resolver = Resolver::new(&self.registry);
        let signature_type = self.schema.signature_type;

        let mut signature = Handle::of_type(signature_type);
        let signature = signature
            .construct(&resolver, &[Value::from(declared)])?
            .clone();
        let signatures = resolver.new_array(
            TypeRef::named(signature_type),
            vec![Value::Object(signature)],
        )?;

        let Some(details) = self.schema.details else {
            return Ok(SigningIdentity::new(signatures, None));
        };

        let keys = resolver.invoke(
            Target::Type(details.details_type),
            details.key_projection,
            &TypeRef::named(details.key_set_type),
            &[signatures.clone()],
        )?;
        if keys.is_null() {
            return Err(ModelError::MissingKeys {
                owner: details.details_type.to_string(),
                method: details.key_projection.to_string(),
            });
        }

        let mut args = vec![
            signatures.clone(),
            Value::Int(details.scheme_version),
            keys,
            Value::Null,
        ];
        if details.shape == DetailsShape::WithPastCertificateFlags {
            args.push(Value::Null);
        }
        let signing_details = resolver.construct(details.details_type, &args)?;
        let signing_info = resolver.construct(
            details.signing_info_type,
            &[Value::Object(signing_details)],
        )?;
        trace!(version = %self.version, "signing identity built");

        Ok(SigningIdentity::new(
            signatures,
            Some(Value::Object(signing_info)),
        ))
    }

    fn signatures_of(&self, identity: &SigningIdentity) -> Result<Vec<String>> {
        let Some(signatures) = &identity.signatures else {
            return Ok(Vec::new());
        };
        let array = signatures.as_array().ok_or_else(|| ModelError::Malformed {
            reason: format!("signatures hold {}", signatures.type_label()),
        })?;

        let resolver = Resolver::new(&self.registry);
        array
            .elements()
            .iter()
            .map(|element| {
                let mut signature =
                    element
                        .as_instance()
                        .cloned()
                        .ok_or_else(|| ModelError::Malformed {
                            reason: format!("signature element is {}", element.type_label()),
                        })?;
                let text = resolver.invoke(
                    Target::Instance(&mut signature),
                    "toCharsString",
                    &TypeRef::Str,
                    &[],
                )?;
                text.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ModelError::Malformed {
                        reason: "signature text is null".to_string(),
                    })
            })
            .collect()
    }
}
