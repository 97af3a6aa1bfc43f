//! Signet configuration
//!
//! Defaults hold the host's names and constants. Hosts may load overrides from
//! JSON; every loaded config goes through [`SignetConfig::validate`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::install::InstallLocationClass;
use crate::{
    GRANTED_BIT, PLATFORM_PACKAGE, PROPAGATION_CAPABILITY, SUBSTITUTION_CAPABILITY,
    SUBSTITUTION_METADATA_KEY,
};

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Input could not be parsed
    #[error("Failed to parse configuration: {reason}")]
    Parse { reason: String },

    /// A field holds an unusable value
    #[error("Invalid configuration field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Complete signet configuration, shared by the query and batch components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignetConfig {
    pub substitution: SubstitutionConfig,
    pub propagation: PropagationConfig,
}

impl SignetConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults without the benign allow-list, and propagation limited to
    /// packages the host also flags as system packages
    pub fn strict() -> Self {
        let mut config = Self::default();
        config.substitution.benign_packages.clear();
        config.propagation.require_system_flag = true;
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.substitution.validate()?;
        self.propagation.validate()
    }
}

/// Query-time substitution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionConfig {
    /// Capability that enables substitution
    pub capability: String,
    /// Metadata key holding the substitute identity
    pub metadata_key: String,
    /// Packages whose missing declaration is not reported
    pub benign_packages: Vec<String>,
    /// Bit a grant entry must carry
    pub grant_bit: i32,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            capability: SUBSTITUTION_CAPABILITY.to_string(),
            metadata_key: SUBSTITUTION_METADATA_KEY.to_string(),
            benign_packages: vec![
                "org.spoofing".to_string(),
                "io.github.shomy.haruka.framework".to_string(),
            ],
            grant_bit: GRANTED_BIT,
        }
    }
}

impl SubstitutionConfig {
    pub fn is_benign(&self, name: &str) -> bool {
        self.benign_packages.iter().any(|p| p == name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        non_empty("substitution.capability", &self.capability)?;
        non_empty("substitution.metadata_key", &self.metadata_key)?;
        if self.grant_bit == 0 {
            return Err(ConfigError::Invalid {
                field: "substitution.grant_bit",
                reason: "must not be zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Batch-time propagation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    pub enabled: bool,
    /// Name of the reference package whose identity is propagated
    pub platform_package: String,
    /// Capability a package declares to receive the reference identity
    pub capability: String,
    /// Locations a package may be installed from to qualify
    pub eligible_locations: Vec<InstallLocationClass>,
    /// Also require the host's system flag
    pub require_system_flag: bool,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            platform_package: PLATFORM_PACKAGE.to_string(),
            capability: PROPAGATION_CAPABILITY.to_string(),
            eligible_locations: vec![InstallLocationClass::Core],
            require_system_flag: false,
        }
    }
}

impl PropagationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_empty("propagation.platform_package", &self.platform_package)?;
        non_empty("propagation.capability", &self.capability)?;
        if self.eligible_locations.is_empty() {
            return Err(ConfigError::Invalid {
                field: "propagation.eligible_locations",
                reason: "at least one location is required".to_string(),
            });
        }
        if self.eligible_locations.contains(&InstallLocationClass::Data) {
            return Err(ConfigError::Invalid {
                field: "propagation.eligible_locations",
                reason: "user-installed packages cannot receive the platform identity"
                    .to_string(),
            });
        }
        Ok(())
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}
