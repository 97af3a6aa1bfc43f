//! Installation requests seen during batch reconciliation

use serde::{Deserialize, Serialize};
use signet_reflect::Value;

/// Partition class a package was installed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallLocationClass {
    /// Core platform component
    Core,
    System,
    SystemExt,
    Product,
    Vendor,
    /// User-installed
    Data,
}

impl InstallLocationClass {
    /// Whether the location is a protected, read-only partition
    pub fn is_protected(self) -> bool {
        !matches!(self, Self::Data)
    }
}

/// Parsed package as the installer sees it
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDescriptor {
    pub name: String,
    pub uses_capabilities: Vec<String>,
    pub location: InstallLocationClass,
    /// Version-specific signing details of the package
    pub signing_identity: Value,
    pub is_system: bool,
    /// Host-reported: already signed with the platform key
    pub signed_with_platform_key: bool,
}

impl PackageDescriptor {
    pub fn new(name: impl Into<String>, location: InstallLocationClass) -> Self {
        Self {
            name: name.into(),
            uses_capabilities: Vec::new(),
            location,
            signing_identity: Value::Null,
            is_system: location.is_protected(),
            signed_with_platform_key: false,
        }
    }

    pub fn with_capability(mut self, name: impl Into<String>) -> Self {
        self.uses_capabilities.push(name.into());
        self
    }

    pub fn with_signing_identity(mut self, identity: Value) -> Self {
        self.signing_identity = identity;
        self
    }

    pub fn signed_with_platform_key(mut self, signed: bool) -> Self {
        self.signed_with_platform_key = signed;
        self
    }

    pub fn uses_capability(&self, name: &str) -> bool {
        self.uses_capabilities.iter().any(|c| c == name)
    }
}

/// User an installation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UserHandle(pub u32);

/// Scan output carried through reconciliation untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult(pub Value);

/// One pending installation in a reconciliation batch
#[derive(Debug, Clone, PartialEq)]
pub struct InstallationRequest {
    pub package: PackageDescriptor,
    pub parse_flags: u32,
    pub scan_flags: u32,
    pub user: UserHandle,
    pub scan_result: ScanResult,
}

impl InstallationRequest {
    pub fn new(package: PackageDescriptor) -> Self {
        Self {
            package,
            parse_flags: 0,
            scan_flags: 0,
            user: UserHandle::default(),
            scan_result: ScanResult::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.package.name
    }

    /// A new request carrying `identity`, every other field copied
    pub fn with_signing_identity(&self, identity: Value) -> Self {
        let package = PackageDescriptor {
            signing_identity: identity,
            ..self.package.clone()
        };
        Self {
            package,
            parse_flags: self.parse_flags,
            scan_flags: self.scan_flags,
            user: self.user,
            scan_result: self.scan_result.clone(),
        }
    }
}
