//! Identity model versions and their schema tables

use std::fmt;

use signet_reflect::TypeRegistry;
use tracing::debug;

use crate::error::{ModelError, Result};

pub const SIGNATURE_TYPE: &str = "android.content.pm.Signature";
pub const SIGNING_INFO_TYPE: &str = "android.content.pm.SigningInfo";
pub const KEY_SET_TYPE: &str = "android.util.ArraySet";
pub const PUBLIC_KEY_TYPE: &str = "java.security.PublicKey";
pub const NESTED_DETAILS_TYPE: &str = "android.content.pm.PackageParser$SigningDetails";
pub const STANDALONE_DETAILS_TYPE: &str = "android.content.pm.SigningDetails";

/// Signature scheme version written into constructed signing details
pub const SIGNING_BLOCK_V3: i32 = 3;

/// Known shapes of the identity data model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelVersion {
    /// Signature array only
    LegacySignatures,
    /// Signing details nested in the package parser, with past-certificate flags
    NestedSigningDetails,
    /// Standalone signing details
    StandaloneSigningDetails,
}

impl ModelVersion {
    /// Every version, newest first
    pub const ALL: [ModelVersion; 3] = [
        ModelVersion::StandaloneSigningDetails,
        ModelVersion::NestedSigningDetails,
        ModelVersion::LegacySignatures,
    ];

    pub fn schema(self) -> SchemaTable {
        let details = match self {
            Self::LegacySignatures => None,
            Self::NestedSigningDetails => Some(DetailsSchema {
                details_type: NESTED_DETAILS_TYPE,
                shape: DetailsShape::WithPastCertificateFlags,
                ..DetailsSchema::standalone()
            }),
            Self::StandaloneSigningDetails => Some(DetailsSchema::standalone()),
        };
        SchemaTable {
            signature_type: SIGNATURE_TYPE,
            details,
        }
    }

    /// Pick the newest version whose types are all registered
    pub fn probe(registry: &TypeRegistry) -> Result<Self> {
        let mut missing = Vec::new();
        for version in Self::ALL {
            missing.clear();
            missing.extend(
                version
                    .schema()
                    .required_types()
                    .into_iter()
                    .filter(|ty| !registry.contains(ty))
                    .map(str::to_string),
            );
            if missing.is_empty() {
                return Ok(version);
            }
            debug!(version = %version, missing = ?missing, "model version not available");
        }
        Err(ModelError::UnsupportedModel { missing })
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LegacySignatures => "legacy-signatures",
            Self::NestedSigningDetails => "nested-signing-details",
            Self::StandaloneSigningDetails => "standalone-signing-details",
        };
        write!(f, "{}", name)
    }
}

/// Constructor shape of the signing-details type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsShape {
    /// `(Signature[], int, ArraySet, Signature[])`
    PastCertificates,
    /// `(Signature[], int, ArraySet, Signature[], int[])`
    WithPastCertificateFlags,
}

impl DetailsShape {
    pub fn arity(self) -> usize {
        match self {
            Self::PastCertificates => 4,
            Self::WithPastCertificateFlags => 5,
        }
    }
}

/// Names the rich signing-info part of a model version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailsSchema {
    pub details_type: &'static str,
    pub signing_info_type: &'static str,
    pub key_set_type: &'static str,
    /// Static method on the details type projecting signatures to keys
    pub key_projection: &'static str,
    pub shape: DetailsShape,
    pub scheme_version: i32,
}

impl DetailsSchema {
    fn standalone() -> Self {
        Self {
            details_type: STANDALONE_DETAILS_TYPE,
            signing_info_type: SIGNING_INFO_TYPE,
            key_set_type: KEY_SET_TYPE,
            key_projection: "toSigningKeys",
            shape: DetailsShape::PastCertificates,
            scheme_version: SIGNING_BLOCK_V3,
        }
    }
}

/// Type names and shapes for one model version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaTable {
    pub signature_type: &'static str,
    /// Absent on legacy models
    pub details: Option<DetailsSchema>,
}

impl SchemaTable {
    /// Types the host must register for this version
    pub fn required_types(&self) -> Vec<&'static str> {
        let mut types = vec![self.signature_type];
        if let Some(details) = &self.details {
            types.extend([
                details.details_type,
                details.signing_info_type,
                details.key_set_type,
            ]);
        }
        types
    }
}
