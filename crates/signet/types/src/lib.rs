//! # signet-types
//!
//! Shared vocabulary for signet: the identity record a query produces, the
//! read-only view the policy gates consult, installation requests seen by the
//! propagation pass, query flags, declarative metadata and configuration.

#![deny(unsafe_code)]

pub mod config;
pub mod flags;
pub mod install;
pub mod metadata;
pub mod record;
pub mod view;

pub use config::{ConfigError, PropagationConfig, SignetConfig, SubstitutionConfig};
pub use flags::QueryFlags;
pub use install::{
    InstallLocationClass, InstallationRequest, PackageDescriptor, ScanResult, UserHandle,
};
pub use metadata::{Metadata, MetadataValue};
pub use record::{IdentityRecord, SigningIdentity};
pub use view::{DeclarationState, PackageView};

/// Capability an application requests to have its signing identity substituted
pub const SUBSTITUTION_CAPABILITY: &str = "android.permission.FAKE_PACKAGE_SIGNATURE";

/// Metadata key holding the substitute signing identity
pub const SUBSTITUTION_METADATA_KEY: &str = "fake-signature";

/// Bit set in a grant entry when the paired capability was granted
pub const GRANTED_BIT: i32 = 0x2;

/// Name of the platform's own package in an installation batch
pub const PLATFORM_PACKAGE: &str = "android";

/// Capability a system package requests to take the platform signing identity
pub const PROPAGATION_CAPABILITY: &str = "android.permission.SPOOF_PLATFORM_SIGNATURE";
