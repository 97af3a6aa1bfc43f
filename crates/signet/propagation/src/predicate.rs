//! System-class predicates
//!
//! Decide whether a package was installed from a location protected enough to
//! receive the platform signing identity.

use std::collections::BTreeSet;
use std::fmt;

use signet_types::{InstallLocationClass, PackageDescriptor, PropagationConfig};

use crate::error::PredicateError;

/// Classifies packages for propagation
pub trait SystemClassPredicate: Send + Sync + fmt::Debug {
    fn accepts(&self, package: &PackageDescriptor) -> Result<bool, PredicateError>;
}

/// Accepts packages installed from an allowed set of locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationPredicate {
    locations: BTreeSet<InstallLocationClass>,
    require_system_flag: bool,
}

impl LocationPredicate {
    /// Core platform components only
    pub fn core_only() -> Self {
        Self {
            locations: BTreeSet::from([InstallLocationClass::Core]),
            require_system_flag: false,
        }
    }

    pub fn from_config(config: &PropagationConfig) -> Self {
        Self {
            locations: config.eligible_locations.iter().copied().collect(),
            require_system_flag: config.require_system_flag,
        }
    }

    pub fn locations(&self) -> &BTreeSet<InstallLocationClass> {
        &self.locations
    }
}

impl Default for LocationPredicate {
    fn default() -> Self {
        Self::core_only()
    }
}

impl SystemClassPredicate for LocationPredicate {
    fn accepts(&self, package: &PackageDescriptor) -> Result<bool, PredicateError> {
        if !package.location.is_protected() {
            return Ok(false);
        }
        if self.require_system_flag && !package.is_system {
            return Err(PredicateError {
                package: package.name.clone(),
                reason: format!(
                    "installed from {:?} but not flagged as a system package",
                    package.location
                ),
            });
        }
        Ok(self.locations.contains(&package.location))
    }
}
