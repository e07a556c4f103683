//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Executor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Maximum nesting depth of a selection (root fields are depth 1)
    pub max_depth: usize,

    /// Resolve top-level query fields concurrently
    ///
    /// Mutation fields always run one after another in request order.
    pub concurrent_fields: bool,

    /// Maximum number of selections a document may expand to
    ///
    /// Fragment spreads count once per expansion, so a document that spreads
    /// the same fragment many times is measured by what it expands to.
    pub max_fields: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            concurrent_fields: true,
            max_fields: 2_000,
        }
    }
}

impl ExecutorConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        if config.max_depth == 0 {
            anyhow::bail!("max_depth must be at least 1");
        }
        if config.max_fields == 0 {
            anyhow::bail!("max_fields must be at least 1");
        }
        Ok(config)
    }
}
