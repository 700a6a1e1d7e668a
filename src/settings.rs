//! Wizard settings file handling.
//!
//! Settings are stored as JSON. Every key is optional in the file; missing
//! keys take their defaults. Command-line flags override file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::providers::{ProviderCatalog, DEFAULT_AWS_REGION};
use crate::types::ProviderId;

/// Runtime settings for a wizard session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardSettings {
    /// Artificial latency of the mock validation backend
    pub remote_delay_ms: u64,
    /// Deadline for a remote validation before the submission is failed
    pub remote_timeout_ms: u64,
    /// Region applied when AWS is picked with an empty region
    pub default_aws_region: String,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            remote_delay_ms: 450,
            remote_timeout_ms: 5_000,
            default_aws_region: DEFAULT_AWS_REGION.to_string(),
        }
    }
}

impl WizardSettings {
    /// Save settings to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize settings to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write settings to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {:?}", path.as_ref()))?;

        let settings: Self =
            serde_json::from_str(&content).context("Failed to parse settings JSON")?;

        Ok(settings)
    }

    /// Validate the settings against the provider catalog
    pub fn validate(&self, catalog: &ProviderCatalog) -> Result<()> {
        if self.remote_timeout_ms == 0 {
            anyhow::bail!("remote_timeout_ms must be greater than zero");
        }
        if !catalog.has_region(ProviderId::Aws, &self.default_aws_region) {
            anyhow::bail!(
                "default_aws_region \"{}\" is not a known AWS region",
                self.default_aws_region
            );
        }
        Ok(())
    }

    pub fn remote_delay(&self) -> Duration {
        Duration::from_millis(self.remote_delay_ms)
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }
}
