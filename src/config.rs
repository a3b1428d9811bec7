//! Gateway configuration loaded from TOML.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::severity::Severity;

/// Identifier used when none is configured.
pub const DEFAULT_IDENTIFIER: &str = "sysgate";

/// Configuration model for the gateway, loaded from TOML.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Identifier the channel is opened with at initialization.
    pub identifier: String,
    /// Optional initial mask restriction: permit this severity and everything
    /// more severe. Absent means the host default mask applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_level: Option<Severity>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            identifier: DEFAULT_IDENTIFIER.to_string(),
            max_level: None,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading configuration from {}", path.display()))?;
        let config: Self = toml::from_str(&data)
            .with_context(|| format!("parsing configuration {}", path.display()))?;
        Ok(config)
    }

    /// Persist the configuration back to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let serialized = toml::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("writing configuration to {}", path.display()))?;
        Ok(())
    }
}
