//! Analyzer configuration loading from YAML files
//!
//! ```yaml
//! version: 1
//! regions:
//!   policy: strict
//! ```

use crate::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration format version understood by this implementation
const SUPPORTED_VERSION: u32 = 1;

/// Root structure for analyzer configuration files
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Multi-region expansion settings
    #[serde(default)]
    pub regions: RegionSettings,
}

/// Multi-region expansion settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegionSettings {
    #[serde(default)]
    pub policy: RegionPolicy,
}

/// How region extension values are parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionPolicy {
    /// Reject empty region tokens and duplicate region names
    #[default]
    Strict,
    /// Strip whitespace, split on commas and keep every token
    Permissive,
}

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            regions: RegionSettings::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AnalyzerError::Config(format!(
                "Failed to read configuration file {:?}: {}",
                path, e
            ))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            AnalyzerError::Yaml(inner) => AnalyzerError::Config(format!(
                "Failed to parse configuration YAML from {:?}: {}",
                path, inner
            )),
            other => other,
        })
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration can be honored
    pub fn validate(&self) -> Result<()> {
        if self.version != SUPPORTED_VERSION {
            return Err(AnalyzerError::Config(format!(
                "analyzer configuration version '{}' not matching current implementation, please use version '{}'",
                self.version, SUPPORTED_VERSION
            )));
        }
        Ok(())
    }

    /// Builder-style override of the region policy
    pub fn with_region_policy(mut self, policy: RegionPolicy) -> Self {
        self.regions.policy = policy;
        self
    }
}
