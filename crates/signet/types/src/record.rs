//! Identity records produced per query

use signet_reflect::Value;

use crate::metadata::Metadata;

/// Signing identity carried by a record.
///
/// Both parts are values of the host data model; their shape depends on the
/// model version in use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SigningIdentity {
    /// Primary signature array
    pub signatures: Option<Value>,
    /// Rich signing information, absent on legacy models
    pub signing_info: Option<Value>,
}

impl SigningIdentity {
    pub fn new(signatures: Value, signing_info: Option<Value>) -> Self {
        Self {
            signatures: Some(signatures),
            signing_info,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_none() && self.signing_info.is_none()
    }
}

/// The structured answer to an identity query for one application
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityRecord {
    pub name: String,
    /// Capabilities the application defines
    pub defined_capabilities: Option<Vec<String>>,
    /// Capabilities the application requests, paired with `grant_flags`
    pub requested_capabilities: Option<Vec<String>>,
    pub grant_flags: Option<Vec<i32>>,
    pub declared_metadata: Option<Metadata>,
    pub signing_identity: SigningIdentity,
}

impl IdentityRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the requested capabilities and their grant flags
    pub fn with_requested<S: Into<String>>(
        mut self,
        entries: impl IntoIterator<Item = (S, i32)>,
    ) -> Self {
        let (names, grants): (Vec<String>, Vec<i32>) =
            entries.into_iter().map(|(n, g)| (n.into(), g)).unzip();
        self.requested_capabilities = Some(names);
        self.grant_flags = Some(grants);
        self
    }

    pub fn with_defined<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.defined_capabilities = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.declared_metadata = Some(metadata);
        self
    }

    pub fn with_signing_identity(mut self, identity: SigningIdentity) -> Self {
        self.signing_identity = identity;
        self
    }

    /// Drop the defined, requested and grant sections
    pub fn clear_capability_sections(&mut self) {
        self.defined_capabilities = None;
        self.requested_capabilities = None;
        self.grant_flags = None;
    }
}
